use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use sn_core::{Error, GenerationModel, Result};

use crate::InferenceConfig;

pub mod dummy;
pub mod gemini;
pub mod openai;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;
pub use openai::OpenAiModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Gemini,
    OpenAi,
    Dummy,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ModelKind::Gemini),
            "openai" | "deepseek" => Ok(ModelKind::OpenAi),
            "dummy" => Ok(ModelKind::Dummy),
            other => Err(Error::Validation(format!(
                "Unknown model '{}'. Available models: gemini (default), openai, dummy",
                other
            ))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Gemini => "gemini",
            ModelKind::OpenAi => "openai",
            ModelKind::Dummy => "dummy",
        };
        f.write_str(name)
    }
}

/// Builds the backend selected by `config.backend`.
pub fn create_model(config: &InferenceConfig) -> Result<Arc<dyn GenerationModel>> {
    let model: Arc<dyn GenerationModel> = match config.backend {
        ModelKind::Gemini => Arc::new(GeminiModel::new(config)?),
        ModelKind::OpenAi => Arc::new(OpenAiModel::new(config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new()),
    };
    Ok(model)
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Generation(format!("Failed to create HTTP client: {}", e)))
}

pub(crate) fn transport_error(backend: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Generation(format!("{} request timed out", backend))
    } else if err.is_decode() {
        Error::Generation(format!("{} returned a malformed response: {}", backend, err))
    } else {
        Error::Generation(format!("{} request failed: {}", backend, err))
    }
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Passes successful responses through, turns the rest into `Generation` errors
/// carrying the backend's own message when it sent one.
pub(crate) async fn check_status(backend: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);
    Err(Error::Generation(format!(
        "{} returned HTTP {}: {}",
        backend,
        status,
        detail.trim()
    )))
}

pub(crate) fn require_text(backend: &str, text: Option<String>) -> Result<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::Generation(format!("{} returned an empty response", backend))),
    }
}
