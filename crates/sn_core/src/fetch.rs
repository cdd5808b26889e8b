use async_trait::async_trait;
use crate::types::ArticleSource;
use crate::Result;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieves the raw HTML for an already validated source.
    async fn fetch(&self, source: &ArticleSource) -> Result<String>;
}
