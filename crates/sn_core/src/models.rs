use async_trait::async_trait;
use crate::Result;

/// A text-generation backend: prompt in, text out.
///
/// Implementations must return the backend's text untouched; an empty
/// response is reported as [`crate::Error::Generation`].
#[async_trait]
pub trait GenerationModel: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}
