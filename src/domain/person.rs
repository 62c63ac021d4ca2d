use crate::domain::schema::{Entity, EntityKind, FieldValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: Option<i64>,
    pub mass: Option<f64>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub birth_year: Option<String>,
    pub gender: Option<String>,
    pub homeworld: Url,
    pub films: Vec<Url>,
    pub species: Vec<Url>,
    pub vehicles: Vec<Url>,
    pub starships: Vec<Url>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: Url,
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "name" => (&self.name).into(),
            "height" => (&self.height).into(),
            "mass" => (&self.mass).into(),
            "hair_color" => (&self.hair_color).into(),
            "skin_color" => (&self.skin_color).into(),
            "eye_color" => (&self.eye_color).into(),
            "birth_year" => (&self.birth_year).into(),
            "gender" => (&self.gender).into(),
            "homeworld" => (&self.homeworld).into(),
            "films" => (&self.films).into(),
            "species" => (&self.species).into(),
            "vehicles" => (&self.vehicles).into(),
            "starships" => (&self.starships).into(),
            "created" => (&self.created).into(),
            "edited" => (&self.edited).into(),
            "url" => (&self.url).into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
impl Person {
    pub(crate) fn sample(name: &str, mass: Option<f64>) -> Self {
        let url = |path: &str| Url::parse(&format!("https://swapi.info/api/{path}")).unwrap();
        let created = "2014-12-09T13:50:51.644Z".parse().unwrap();
        Self {
            name: name.to_string(),
            height: None,
            mass,
            hair_color: None,
            skin_color: None,
            eye_color: None,
            birth_year: None,
            gender: None,
            homeworld: url("planets/1"),
            films: vec![url("films/1")],
            species: vec![],
            vehicles: vec![],
            starships: vec![],
            created,
            edited: created,
            url: url("people/1"),
        }
    }
}
