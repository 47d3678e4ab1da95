//! Gemini REST client behind the [`Generator`] capability.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::generator::{GenerateError, Generator, GeneratorFactory, Role, Turn};
use crate::config::GeminiConfig;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GenerateError::Client(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// System turns go to `systemInstruction`; the rest become `contents`.
fn build_request(transcript: &[Turn]) -> GenerateContentRequest<'_> {
    let system: Vec<Part<'_>> = transcript
        .iter()
        .filter(|t| t.role == Role::System)
        .map(|t| Part { text: &t.text })
        .collect();

    let contents = transcript
        .iter()
        .filter_map(|t| {
            let role = match t.role {
                Role::System => return None,
                Role::User => "user",
                Role::Model => "model",
            };
            Some(Content {
                role: Some(role),
                parts: vec![Part { text: &t.text }],
            })
        })
        .collect();

    GenerateContentRequest {
        contents,
        system_instruction: (!system.is_empty()).then_some(Content {
            role: None,
            parts: system,
        }),
    }
}

/// Text of the first candidate. A reply without candidates or text is empty,
/// not an error.
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, transcript: &[Turn]) -> Result<String, GenerateError> {
        let body = build_request(transcript);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, model = %self.model, "gemini request failed");
                GenerateError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, model = %self.model, "gemini returned an error status");
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse gemini response");
            GenerateError::Decode(e.to_string())
        })?;

        let text = extract_text(parsed);
        debug!(model = %self.model, chars = text.len(), "gemini replied");
        Ok(text)
    }
}

/// Builds [`GeminiClient`]s for the configured model and endpoint.
#[derive(Debug, Clone)]
pub struct GeminiFactory {
    config: GeminiConfig,
}

impl GeminiFactory {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }
}

impl GeneratorFactory for GeminiFactory {
    fn model(&self) -> &str {
        &self.config.model
    }

    fn build(&self, api_key: &str) -> Result<Arc<dyn Generator>, GenerateError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GenerateError::Client("empty API key".into()));
        }
        let client = GeminiClient::new(api_key, &self.config.model, &self.config.base_url)?;
        Ok(Arc::new(client))
    }
}
