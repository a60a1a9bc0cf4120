//! Google Gemini `generateContent` adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Endpoint;
use crate::inference::{http, CompletionProvider, InferenceError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Gemini adapter. The key travels in the `x-goog-api-key` header.
pub struct GeminiProvider {
    endpoint: Endpoint,
}

impl GeminiProvider {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let url = self
            .endpoint
            .url(&format!("models/{}:generateContent", self.endpoint.model));

        let request = self
            .endpoint
            .client
            .post(url)
            .header("x-goog-api-key", &self.endpoint.api_key)
            .json(&body);

        let response: GenerateResponse =
            http::send_json(self.provider_name(), request, self.endpoint.timeout).await?;

        response.into_text().ok_or(InferenceError::EmptyCompletion)
    }

    fn provider_name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> &str {
        self.endpoint.model()
    }
}
