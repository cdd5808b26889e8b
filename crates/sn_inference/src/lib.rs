use std::env;
use std::fmt;
use std::time::Duration;

pub mod models;
pub mod prompts;

pub use models::{create_model, ModelKind};
pub use prompts::{build_prompt, render};

/// Budget for a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct InferenceConfig {
    pub backend: ModelKind,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            backend: ModelKind::Gemini,
            api_key: None,
            model_name: None,
            base_url: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

impl InferenceConfig {
    /// Reads the key for `backend` plus the optional `SN_*` overrides.
    pub fn from_env(backend: ModelKind) -> Self {
        let api_key = match backend {
            ModelKind::Gemini => env_var("GEMINI_API_KEY"),
            ModelKind::OpenAi => env_var("OPENAI_API_KEY"),
            ModelKind::Dummy => None,
        };
        let timeout = env_var("SN_GENERATION_TIMEOUT_SECS")
            .and_then(|secs| secs.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_GENERATION_TIMEOUT);

        Self {
            backend,
            api_key,
            model_name: env_var("SN_MODEL_NAME"),
            base_url: env_var("SN_MODEL_URL"),
            timeout,
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::prompts::build_prompt;
    pub use super::InferenceConfig;
    pub use sn_core::{Error, GenerationModel, Mode, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = InferenceConfig {
            api_key: Some("secret-key".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
