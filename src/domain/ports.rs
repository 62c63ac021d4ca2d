use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of raw upstream collections.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Full URL the collection is fetched from, used in logs and errors.
    fn url_for(&self, resource: &str) -> String;

    /// One network call returning the collection's raw JSON items.
    async fn fetch_raw(&self, resource: &str) -> Result<Vec<serde_json::Value>>;
}
