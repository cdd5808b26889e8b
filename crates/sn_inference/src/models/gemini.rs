use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sn_core::{Error, GenerationModel, Result};
use tracing::debug;

use super::{check_status, http_client, require_text, transport_error};
use crate::InferenceConfig;

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated as returned.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        Some(text)
    }
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiModel {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Generation("Gemini API key is required (GEMINI_API_KEY)".to_string()))?;

        Ok(Self {
            client: http_client(config.timeout)?,
            api_key,
            model_name: config
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl GenerationModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model_name, prompt_chars = prompt.len(), "calling Gemini");
        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model_name))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        let response = check_status(self.name(), response)
            .await?
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| transport_error(self.name(), e))?;

        require_text(self.name(), response.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode, Uri};
    use axum::response::IntoResponse;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::net::SocketAddr;

    async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn model_for(addr: SocketAddr) -> GeminiModel {
        GeminiModel::new(&InferenceConfig {
            api_key: Some("test-key".to_string()),
            model_name: Some("test-model".to_string()),
            base_url: Some(format!("http://{}/", addr)),
            ..Default::default()
        })
        .unwrap()
    }

    async fn echo(uri: Uri, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        if uri.path() != "/models/test-model:generateContent"
            || headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key")
        {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": { "message": "bad request" } })));
        }
        let prompt = body["contents"][0]["parts"][0]["text"].clone();
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "## 📌 Overview\n" }, { "text": prompt }] } }]
            })),
        )
    }

    #[test]
    fn test_requires_api_key() {
        let err = GeminiModel::new(&InferenceConfig::default()).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_generate_passes_text_through() {
        let addr = serve(Router::new().fallback(echo)).await;
        let model = model_for(addr);

        let text = model.generate("  keep my spacing \n").await.unwrap();
        assert_eq!(text, "## 📌 Overview\n  keep my spacing \n");
    }

    #[tokio::test]
    async fn test_backend_error_message_is_surfaced() {
        let router = Router::new().fallback(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": { "message": "Resource has been exhausted" } })),
            )
        });
        let model = model_for(serve(router).await);

        let err = model.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Resource has been exhausted"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_generation_error() {
        let router = Router::new().fallback(|| async { Json(json!({ "candidates": [] })) });
        let model = model_for(serve(router).await);

        let err = model.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_generation_error() {
        let router = Router::new().fallback(|| async { "not json" });
        let model = model_for(serve(router).await);

        assert!(matches!(model.generate("prompt").await, Err(Error::Generation(_))));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let router = Router::new().fallback(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Json(json!({ "candidates": [] }))
        });
        let addr = serve(router).await;
        let model = GeminiModel::new(&InferenceConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some(format!("http://{}", addr)),
            timeout: std::time::Duration::from_millis(300),
            ..Default::default()
        })
        .unwrap();

        let err = model.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("timed out"));
    }
}
