pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{ClientConfig, ServerConfig};
pub use crate::core::{HttpUpstream, PagePipeline};
pub use crate::domain::{Entity, EntityKind, PageEnvelope, PageQuery, Person, Planet, SortOrder};
pub use crate::utils::error::{Result, SwapiError};
