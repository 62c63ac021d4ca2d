//! Static field metadata for each entity kind.
//!
//! The filter/sort engine consults these tables instead of inspecting entity
//! types at runtime: a field is sortable when it exists on the schema and is
//! not list-typed.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    Int,
    Float,
    DateTime,
    Url,
    UrlList,
    /// Shape varies per record (e.g. planet gravity).
    Any,
}

impl FieldType {
    pub const fn is_list(self) -> bool {
        matches!(self, FieldType::UrlList)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: &'static str,
    pub field_type: FieldType,
    pub sortable: bool,
}

const fn field(name: &'static str, field_type: FieldType) -> FieldMeta {
    FieldMeta {
        name,
        field_type,
        sortable: !field_type.is_list(),
    }
}

#[derive(Debug)]
pub struct Schema {
    pub kind: EntityKind,
    pub fields: &'static [FieldMeta],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_sortable(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.sortable)
    }
}

pub static PERSON_SCHEMA: Schema = Schema {
    kind: EntityKind::Person,
    fields: &[
        field("name", FieldType::Str),
        field("height", FieldType::Int),
        field("mass", FieldType::Float),
        field("hair_color", FieldType::Str),
        field("skin_color", FieldType::Str),
        field("eye_color", FieldType::Str),
        field("birth_year", FieldType::Str),
        field("gender", FieldType::Str),
        field("homeworld", FieldType::Url),
        field("films", FieldType::UrlList),
        field("species", FieldType::UrlList),
        field("vehicles", FieldType::UrlList),
        field("starships", FieldType::UrlList),
        field("created", FieldType::DateTime),
        field("edited", FieldType::DateTime),
        field("url", FieldType::Url),
    ],
};

pub static PLANET_SCHEMA: Schema = Schema {
    kind: EntityKind::Planet,
    fields: &[
        field("name", FieldType::Str),
        field("rotation_period", FieldType::Int),
        field("orbital_period", FieldType::Int),
        field("diameter", FieldType::Int),
        field("climate", FieldType::Str),
        field("gravity", FieldType::Any),
        field("terrain", FieldType::Str),
        field("surface_water", FieldType::Float),
        field("population", FieldType::Int),
        field("residents", FieldType::UrlList),
        field("films", FieldType::UrlList),
        field("created", FieldType::DateTime),
        field("edited", FieldType::DateTime),
        field("url", FieldType::Url),
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Planet,
}

impl EntityKind {
    /// Upstream collection and service route name.
    pub fn resource(self) -> &'static str {
        match self {
            EntityKind::Person => "people",
            EntityKind::Planet => "planets",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Person => "People",
            EntityKind::Planet => "Planets",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            EntityKind::Person => &PERSON_SCHEMA,
            EntityKind::Planet => &PLANET_SCHEMA,
        }
    }

    /// Columns the terminal client shows for this kind.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Person => &[
                "name",
                "height",
                "mass",
                "hair_color",
                "skin_color",
                "eye_color",
                "birth_year",
                "gender",
            ],
            EntityKind::Planet => &[
                "name",
                "rotation_period",
                "orbital_period",
                "diameter",
                "climate",
                "gravity",
                "terrain",
                "surface_water",
                "population",
            ],
        }
    }
}

/// Borrowed view of one entity field, used for sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Int(i64),
    Float(f64),
    Text(&'a str),
    DateTime(DateTime<Utc>),
    Url(&'a Url),
    List(&'a [Url]),
    Json(&'a serde_json::Value),
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a i64> for FieldValue<'a> {
    fn from(value: &'a i64) -> Self {
        FieldValue::Int(*value)
    }
}

impl<'a> From<&'a f64> for FieldValue<'a> {
    fn from(value: &'a f64) -> Self {
        FieldValue::Float(*value)
    }
}

impl<'a> From<&'a DateTime<Utc>> for FieldValue<'a> {
    fn from(value: &'a DateTime<Utc>) -> Self {
        FieldValue::DateTime(*value)
    }
}

impl<'a> From<&'a Url> for FieldValue<'a> {
    fn from(value: &'a Url) -> Self {
        FieldValue::Url(value)
    }
}

impl<'a> From<&'a Vec<Url>> for FieldValue<'a> {
    fn from(value: &'a Vec<Url>) -> Self {
        FieldValue::List(value)
    }
}

impl<'a> From<&'a serde_json::Value> for FieldValue<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            other => FieldValue::Json(other),
        }
    }
}

impl<'a, T> From<&'a Option<T>> for FieldValue<'a>
where
    &'a T: Into<FieldValue<'a>>,
{
    fn from(value: &'a Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

/// A typed record the pipeline can fetch, filter, sort and page.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn schema() -> &'static Schema {
        Self::KIND.schema()
    }

    fn name(&self) -> &str;

    /// `None` when the schema has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
