use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{Provider, execute_json, join_endpoint, require_api_key};
use crate::errors::ProviderError;

/// Gemini client for the Generative Language `generateContent` API
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key, sent as the `key` query parameter
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Model identifier, part of the request path
    model: String,
}

impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation turns
    pub contents: Vec<GeminiContent>,
}

/// One conversation turn
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GeminiContent {
    /// Content parts of the turn
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A text part
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: Option<String>,
}

/// generateContent response
#[derive(Debug, Deserialize, Default)]
pub struct GeminiResponse {
    /// Generated candidates, best first
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// A single generated candidate
#[derive(Debug, Deserialize, Default)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

impl GeminiRequest {
    /// Create a request with a single user turn
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(text.into()),
                }],
            }],
        }
    }
}

impl Gemini {
    /// Create a new Gemini client with the default timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, model, Duration::from_secs(60))
    }

    /// Create a new Gemini client with an explicit request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Full URL of the generateContent call, without the key
    pub fn api_url(&self) -> String {
        join_endpoint(
            &self.endpoint,
            &format!("v1beta/models/{}:generateContent", self.model),
        )
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    fn name(&self) -> &str {
        "Gemini"
    }

    fn build_request(&self, prompt: &str) -> Self::Request {
        GeminiRequest::new(prompt)
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        require_api_key(self.name(), &self.api_key)?;

        let builder = self
            .client
            .post(self.api_url())
            .query(&[("key", self.api_key.as_str())]);

        execute_json(self.name(), builder, &request).await
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .clone()
    }
}
