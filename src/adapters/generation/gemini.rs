//! Gemini text generation adapter.
//!
//! Calls the `generateContent` endpoint via reqwest with a bounded timeout.
//! Callers treat this backend as unreliable and wrap every call with their
//! own fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GenerationConfig;
use crate::domain::ports::TextGenerator;

/// Gemini generative text backend.
pub struct GeminiTextGenerator {
    config: GenerationConfig,
    client: Arc<reqwest::Client>,
}

impl GeminiTextGenerator {
    pub fn new(config: GenerationConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::GenerationFailed(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    fn api_key(&self) -> DomainResult<String> {
        self.config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                DomainError::GenerationFailed(
                    "Gemini API key not set. Set GEMINI_API_KEY env var or configure api_key."
                        .to_string(),
                )
            })
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> DomainResult<String> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DomainError::GenerationFailed(format!("Generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::GenerationFailed(format!(
                "Generation API returned {status}: {body}"
            )));
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            DomainError::SerializationError(format!("Failed to parse generation response: {e}"))
        })?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| DomainError::GenerationFailed("Empty generation response".to_string()))?;

        Ok(text)
    }
}

// -- Gemini API request/response types --

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Content,
}
