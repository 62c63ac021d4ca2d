// Domain layer: entity models, schema metadata and ports. No network or runtime dependencies.

pub mod model;
pub mod person;
pub mod planet;
pub mod ports;
pub mod schema;

pub use model::{NormalizedRecord, PageEnvelope, PageQuery, RawRecord, SortOrder, Value};
pub use person::Person;
pub use planet::Planet;
pub use schema::{Entity, EntityKind, FieldMeta, FieldType, FieldValue, Schema};
