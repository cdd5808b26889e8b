use std::fmt;

use async_trait::async_trait;
use sn_core::{GenerationModel, Result};

use super::require_text;
use crate::prompts::schema_headings;

/// Offline backend: answers with the heading skeleton the prompt asks for.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let headings = schema_headings(prompt);
        let text = if headings.is_empty() {
            // No schema to echo: fall back to the opening words.
            prompt.split_whitespace().take(20).collect::<Vec<_>>().join(" ")
        } else {
            headings
                .iter()
                .map(|heading| format!("{}\n", heading))
                .collect::<Vec<_>>()
                .join("\n")
        };
        require_text(self.name(), Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::build_prompt;
    use sn_core::{Error, Mode};

    #[tokio::test]
    async fn test_dummy_model_echoes_schema() {
        let model = DummyModel::new();
        let prompt = build_prompt(Mode::Summary, "Title", "Some content.");

        let text = model.generate(&prompt).await.unwrap();
        assert!(text.starts_with("## 📌 Overview\n"));
        assert!(text.contains("## 🧠 In Simple Words"));
    }

    #[tokio::test]
    async fn test_dummy_model_plain_prompt() {
        let model = DummyModel::new();
        assert_eq!(model.generate("just a few words").await.unwrap(), "just a few words");
        assert!(matches!(model.generate("   ").await, Err(Error::Generation(_))));
    }

    #[tokio::test]
    async fn test_dummy_model_keeps_twenty_words_without_schema() {
        let model = DummyModel::new();
        let prompt: Vec<String> = (1..=30).map(|i| format!("w{}", i)).collect();

        let text = model.generate(&prompt.join(" ")).await.unwrap();
        assert_eq!(text, prompt[..20].join(" "));
    }
}
