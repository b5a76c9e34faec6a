//! Gemini `generateContent` client.
//!
//! Sends the composed prompt with a JSON response schema and returns the
//! model's text verbatim.
//! See: <https://ai.google.dev/api/generate-content>

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::traits::ClassificationOracle;
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::types::ClassificationRequest;
use crate::{Result, SolsieveError};

/// Client for the Gemini generative language API.
///
/// No HTTP timeout and no retry: one `classify` is one POST. Every failure
/// is flattened into [`SolsieveError::Communication`].
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: Client,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client for `model` against the public endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration and the process environment.
    ///
    /// Fails with `Configuration` when no API key is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with(config, |name| std::env::var(name).ok())
    }

    /// Same as [`from_config`](Self::from_config), with a custom variable lookup.
    pub fn from_config_with<F>(config: &Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = config.api_key_with(lookup)?;
        Ok(Self::with_base_url(
            api_key,
            config.oracle.model.clone(),
            config.oracle.base_url.clone(),
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Issue one `generateContent` call and return the concatenated text parts.
    pub async fn generate(&self, request: &ClassificationRequest) -> Result<String> {
        let body = GenerateContentRequest::from_request(request);
        let url = self.endpoint();
        debug!(model = %self.model, prompt_len = request.prompt().len(), "sending classification request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SolsieveError::Communication(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(SolsieveError::Communication(format!(
                "Gemini API error ({}): {detail}",
                status.as_u16()
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SolsieveError::Communication(format!("undecodable response: {e}")))?;

        envelope.text().ok_or_else(|| {
            SolsieveError::Communication("response carried no candidate text".to_string())
        })
    }
}

#[async_trait]
impl ClassificationOracle for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn classify(&self, request: &ClassificationRequest) -> Result<String> {
        GeminiClient::generate(self, request).await
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a ClassificationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: request.prompt(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: to_gemini_schema(request.schema()),
                temperature: request.temperature(),
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
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

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gemini's schema dialect names types in upper case (`OBJECT`, `ARRAY`, …).
fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}
