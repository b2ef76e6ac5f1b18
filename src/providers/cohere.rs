use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{Provider, execute_json, join_endpoint, require_api_key};
use crate::errors::ProviderError;

/// Cohere client for the v2 chat API
pub struct Cohere {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Model identifier
    model: String,
}

impl fmt::Debug for Cohere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cohere")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Chat request
#[derive(Debug, Serialize)]
pub struct CohereRequest {
    /// The model to use
    pub model: String,
    /// The messages for the conversation
    pub messages: Vec<CohereMessage>,
}

/// Chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct CohereMessage {
    /// Role of the message sender (user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat response
#[derive(Debug, Deserialize, Default)]
pub struct CohereResponse {
    #[serde(default)]
    pub message: Option<CohereResponseMessage>,
}

/// Assistant message in a chat response
#[derive(Debug, Deserialize, Default)]
pub struct CohereResponseMessage {
    #[serde(default)]
    pub content: Vec<CohereContent>,
}

/// Content block of an assistant message
#[derive(Debug, Deserialize, Default)]
pub struct CohereContent {
    /// The type of content
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl CohereRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(CohereMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }
}

impl Cohere {
    /// Create a new Cohere client with the default timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, model, Duration::from_secs(60))
    }

    /// Create a new Cohere client with an explicit request timeout
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

    pub fn api_url(&self) -> String {
        join_endpoint(&self.endpoint, "v2/chat")
    }
}

#[async_trait]
impl Provider for Cohere {
    type Request = CohereRequest;
    type Response = CohereResponse;

    fn name(&self) -> &str {
        "Cohere"
    }

    fn build_request(&self, prompt: &str) -> Self::Request {
        CohereRequest::new(self.model.as_str()).add_message("user", prompt)
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        require_api_key(self.name(), &self.api_key)?;

        let builder = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key);

        execute_json(self.name(), builder, &request).await
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response.message.as_ref()?.content.first()?.text.clone()
    }
}
