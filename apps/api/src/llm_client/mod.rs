//! LLM Client: the single point of entry for all generative-language API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All completion requests go through a `CompletionClient`.
//!
//! Model: gemini-1.5-flash (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// The model used for all completion calls.
pub const MODEL: &str = "gemini-1.5-flash";
/// Environment variable holding the API key. Read on every call.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Value shipped in sample `.env` files; treated the same as no key.
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API Key is missing. Please add your Gemini API key to a .env file (GEMINI_API_KEY=...).")]
    MissingCredential,

    /// Built with the request URL stripped so it never reaches the transcript.
    #[error("{0}")]
    Http(reqwest::Error),

    #[error("API request failed: {message}")]
    Api { status: u16, message: String },

    #[error("No valid content in AI response.")]
    EmptyContent,
}

/// A file sent alongside the prompt, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAttachment {
    pub mime_type: String,
    pub data: String,
}

/// One single-turn completion request: a prompt and an optional attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub attachment: Option<InlineAttachment>,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Http(err.without_url())
    }
}

impl CompletionRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(prompt: impl Into<String>, attachment: InlineAttachment) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: Some(attachment),
        }
    }
}

/// Completion backend. Implement this to swap providers without touching the
/// assistant or handler code.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-empty.
    fn into_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Credential
// ────────────────────────────────────────────────────────────────────────────

/// Where the API key comes from. `Env` is resolved on every call so a key
/// added to the environment takes effect without a restart.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    Env(&'static str),
    #[cfg(test)]
    Static(String),
}

impl ApiKeySource {
    fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => std::env::var(var).ok()?,
            #[cfg(test)]
            ApiKeySource::Static(key) => key.clone(),
        };
        let key = key.trim().to_string();
        (!key.is_empty() && key != PLACEHOLDER_API_KEY).then_some(key)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` endpoint. One request per call, no retry.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: ApiKeySource,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: ApiKeySource) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, MODEL)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.resolve().ok_or(LlmError::MissingCredential)?;

        let mut parts = vec![Part::Text {
            text: &request.prompt,
        }];
        if let Some(attachment) = &request.attachment {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: &attachment.mime_type,
                    data: &attachment.data,
                },
            });
        }
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        debug!(
            "Calling {MODEL}: prompt_chars={}, attachment={}",
            request.prompt.len(),
            request.attachment.is_some()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Gemini API returned {status}");
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply = serde_json::from_str::<GenerateContentResponse>(&text)
            .map_err(|e| warn!("Unreadable Gemini response: {e}"))
            .ok()
            .and_then(GenerateContentResponse::into_text)
            .ok_or(LlmError::EmptyContent)?;

        debug!("Completion succeeded: reply_chars={}", reply.len());
        Ok(reply)
    }
}
