use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::try_join_all;
use sn_core::{
    ArticleSource, Error, GenerationModel, GenerationRequest, GenerationResult, Mode, PageFetcher,
    Result,
};
use sn_inference::prompts;
use tracing::{info, warn};

use crate::extractor::extract_article;

/// Fetch → Extract → (Build + Generate per mode). Holds no per-request state,
/// so one instance can serve any number of concurrent runs.
pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn GenerationModel>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, model: Arc<dyn GenerationModel>) -> Self {
        Self { fetcher, model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn summarize(&self, url: &str) -> Result<GenerationResult> {
        self.run(url, &[Mode::Summary]).await
    }

    pub async fn notes(&self, url: &str) -> Result<GenerationResult> {
        self.run(url, &[Mode::Notes]).await
    }

    /// Summary and notes from a single fetch.
    pub async fn process(&self, url: &str) -> Result<GenerationResult> {
        self.run(url, &Mode::ALL).await
    }

    /// Runs the pipeline for every distinct mode in `modes`, failing with the
    /// first error from any stage.
    pub async fn run(&self, url: &str, modes: &[Mode]) -> Result<GenerationResult> {
        match self.execute(url, modes).await {
            Ok(result) => Ok(result),
            Err(e) => {
                let stage = e.stage().map(|s| s.to_string()).unwrap_or_default();
                warn!(url = %url, stage = %stage, error = %e, "❌ Pipeline failed");
                Err(e)
            }
        }
    }

    async fn execute(&self, url: &str, modes: &[Mode]) -> Result<GenerationResult> {
        let source = ArticleSource::parse(url)?;
        let modes: BTreeSet<Mode> = modes.iter().copied().collect();
        if modes.is_empty() {
            return Err(Error::Validation("At least one mode is required".to_string()));
        }

        info!(url = %source, "🌐 Fetching article");
        let html = self.fetcher.fetch(&source).await?;

        let article = extract_article(&html)?;
        drop(html);
        info!(
            url = %source,
            title = %article.title,
            chars = article.content.chars().count(),
            "📰 Extracted article"
        );

        let model = &self.model;
        let generations = modes.iter().map(|&mode| {
            let request = GenerationRequest::new(mode, &article);
            async move {
                let prompt = prompts::render(&request);
                info!(mode = %mode, model = model.name(), "🤖 Generating");
                let text = model.generate(&prompt).await?;
                info!(mode = %mode, chars = text.len(), "✨ Generated");
                Ok::<_, Error>((mode, text))
            }
        });
        let outputs = try_join_all(generations).await?;

        let mut result = GenerationResult::new(article.title, source.as_str());
        for (mode, text) in outputs {
            result.set(mode, text);
        }
        Ok(result)
    }
}
