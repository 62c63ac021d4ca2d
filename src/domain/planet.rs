use crate::domain::schema::{Entity, EntityKind, FieldValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub rotation_period: Option<i64>,
    pub orbital_period: Option<i64>,
    pub diameter: Option<i64>,
    pub climate: Option<String>,
    /// Either a number or free text such as "1 standard".
    pub gravity: Option<serde_json::Value>,
    pub terrain: Option<String>,
    pub surface_water: Option<f64>,
    pub population: Option<i64>,
    pub residents: Vec<Url>,
    pub films: Vec<Url>,
    pub created: DateTime<Utc>,
    pub edited: DateTime<Utc>,
    pub url: Url,
}

impl Entity for Planet {
    const KIND: EntityKind = EntityKind::Planet;

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "name" => (&self.name).into(),
            "rotation_period" => (&self.rotation_period).into(),
            "orbital_period" => (&self.orbital_period).into(),
            "diameter" => (&self.diameter).into(),
            "climate" => (&self.climate).into(),
            "gravity" => (&self.gravity).into(),
            "terrain" => (&self.terrain).into(),
            "surface_water" => (&self.surface_water).into(),
            "population" => (&self.population).into(),
            "residents" => (&self.residents).into(),
            "films" => (&self.films).into(),
            "created" => (&self.created).into(),
            "edited" => (&self.edited).into(),
            "url" => (&self.url).into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
impl Planet {
    pub(crate) fn sample(name: &str, gravity: Option<serde_json::Value>) -> Self {
        let url = |path: &str| Url::parse(&format!("https://swapi.info/api/{path}")).unwrap();
        let created = "2014-12-10T17:23:29.896Z".parse().unwrap();
        Self {
            name: name.to_string(),
            rotation_period: None,
            orbital_period: None,
            diameter: None,
            climate: None,
            gravity,
            terrain: None,
            surface_water: None,
            population: None,
            residents: vec![],
            films: vec![],
            created,
            edited: created,
            url: url("planets/1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dantooine() -> serde_json::Value {
        serde_json::json!({
            "name": "Dantooine",
            "rotation_period": 25,
            "orbital_period": 378,
            "diameter": 9830,
            "climate": "temperate",
            "gravity": "1 standard",
            "terrain": "oceans, savannas, mountains, grasslands",
            "surface_water": null,
            "population": 1000,
            "residents": [],
            "films": [],
            "created": "2014-12-10T17:23:29.896Z",
            "edited": "2014-12-20T20:58:18.461Z",
            "url": "https://swapi.info/api/planets/25"
        })
    }

    #[test]
    fn test_deserialize_planet() {
        let planet: Planet = serde_json::from_value(dantooine()).unwrap();
        assert_eq!(planet.name(), "Dantooine");
        assert_eq!(planet.surface_water, None);
        assert_eq!(planet.field("population"), Some(FieldValue::Int(1000)));
        assert_eq!(
            planet.field("gravity"),
            Some(FieldValue::Json(&serde_json::json!("1 standard")))
        );
    }

    #[test]
    fn test_gravity_accepts_numbers() {
        let mut raw = dantooine();
        raw["gravity"] = serde_json::json!(1);
        let planet: Planet = serde_json::from_value(raw).unwrap();
        assert_eq!(planet.gravity, Some(serde_json::json!(1)));
    }

    #[test]
    fn test_every_schema_field_is_readable() {
        let planet: Planet = serde_json::from_value(dantooine()).unwrap();
        for meta in Planet::schema().fields {
            assert!(planet.field(meta.name).is_some(), "{} unreadable", meta.name);
        }
    }
}
