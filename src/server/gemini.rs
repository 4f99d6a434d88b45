//! Gemini `generateContent` client. Thin HTTP wrapper; response extraction is
//! a pure function so it can be tested without a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Returned instead of an error when the upstream answers without a usable
/// candidate.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated.";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The HTTP request to the upstream failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The upstream returned a non-success HTTP status.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// The upstream response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

/// Seam between the relay handler and the upstream provider. The only
/// production implementation is [`GeminiClient`]; tests substitute stubs.
#[async_trait]
pub trait GenerateText: Send + Sync {
    async fn generate(&self, model: &str, chat: &str) -> Result<String, GeminiError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl GenerateText for GeminiClient {
    async fn generate(&self, model: &str, chat: &str) -> Result<String, GeminiError> {
        let endpoint = format!("{BASE_URL}/{model}:generateContent");
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: chat.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(GeminiError::Status { status, body: text });
        }

        parse_generate_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
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

// =============================================================================
// PARSING
// =============================================================================

/// Extract `candidates[0].content.parts[0].text`; any missing level falls
/// back to the placeholder rather than erroring.
fn parse_generate_response(json: &str) -> Result<String, GeminiError> {
    let api: GenerateResponse =
        serde_json::from_str(json).map_err(|e| GeminiError::Parse(e.to_string()))?;

    let text = api
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text);

    Ok(text.unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string()))
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
