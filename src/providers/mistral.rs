use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{Provider, execute_json, join_endpoint, require_api_key};
use crate::errors::ProviderError;

/// Mistral client for the chat completions API
pub struct Mistral {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Model identifier
    model: String,
}

impl fmt::Debug for Mistral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mistral")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct MistralRequest {
    /// The model to use
    pub model: String,
    /// The messages for the conversation
    pub messages: Vec<MistralMessage>,
}

/// Chat message
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MistralMessage {
    /// Role of the message sender (system, user, assistant)
    #[serde(default)]
    pub role: String,
    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat completion response
#[derive(Debug, Deserialize, Default)]
pub struct MistralResponse {
    #[serde(default)]
    pub choices: Vec<MistralChoice>,
    /// Token usage information
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

/// A completion choice
#[derive(Debug, Deserialize, Default)]
pub struct MistralChoice {
    #[serde(default)]
    pub message: Option<MistralMessage>,
}

/// Token usage information
#[derive(Debug, Deserialize, Default)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl MistralRequest {
    /// Create a new chat completion request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(MistralMessage {
            role: role.into(),
            content: Some(content.into()),
        });
        self
    }
}

impl Mistral {
    /// Create a new Mistral client with the default timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(api_key, endpoint, model, Duration::from_secs(60))
    }

    /// Create a new Mistral client with an explicit request timeout
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
        join_endpoint(&self.endpoint, "v1/chat/completions")
    }
}

#[async_trait]
impl Provider for Mistral {
    type Request = MistralRequest;
    type Response = MistralResponse;

    fn name(&self) -> &str {
        "Mistral"
    }

    fn build_request(&self, prompt: &str) -> Self::Request {
        MistralRequest::new(self.model.as_str()).add_message("user", prompt)
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        require_api_key(self.name(), &self.api_key)?;

        let builder = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key);

        let response: MistralResponse = execute_json(self.name(), builder, &request).await?;
        if let Some(usage) = &response.usage {
            log::debug!(
                "Mistral usage: {} prompt + {} completion = {} tokens",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        Ok(response)
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response
            .choices
            .first()?
            .message
            .as_ref()?
            .content
            .clone()
    }
}
