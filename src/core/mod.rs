pub mod fetcher;
pub mod normalize;
pub mod paginate;
pub mod pipeline;
pub mod query;

pub use crate::domain::ports::Upstream;
pub use crate::utils::error::Result;
pub use fetcher::{Fetcher, HttpUpstream};
pub use pipeline::PagePipeline;
