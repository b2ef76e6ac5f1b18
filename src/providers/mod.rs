/*!
 * Provider implementations for the remote rewriting services.
 *
 * This module contains client implementations for the supported LLM providers:
 * - Gemini: Google Generative Language API
 * - Cohere: Cohere v2 chat API
 * - Mistral: Mistral chat completions API
 * - Mock: in-process provider for dry runs and tests
 */

use async_trait::async_trait;
use log::error;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the rewriting pipeline.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Human-readable provider name used in logs
    fn name(&self) -> &str;

    /// Build a single-turn request carrying `prompt`
    fn build_request(&self, prompt: &str) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider with a minimal prompt
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = self.build_request("Hello");
        self.complete(request).await.map(|_| ())
    }

    /// Extract text from the provider response, `None` when the expected field is absent
    fn extract_text(response: &Self::Response) -> Option<String>;
}

/// Reject requests that would be sent without a credential
pub(crate) fn require_api_key(provider: &str, api_key: &str) -> Result<(), ProviderError> {
    if api_key.trim().is_empty() {
        return Err(ProviderError::AuthenticationError(format!(
            "No API key configured for {}",
            provider
        )));
    }
    Ok(())
}

/// Send a JSON request and decode a JSON response, mapping failures to [`ProviderError`]
pub(crate) async fn execute_json<Req, Resp>(
    provider: &str,
    builder: reqwest::RequestBuilder,
    body: &Req,
) -> Result<Resp, ProviderError>
where
    Req: Serialize + Sync + ?Sized,
    Resp: DeserializeOwned,
{
    let response = builder
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("{} API error ({}): {}", provider, status, error_text);
        return Err(ProviderError::from_status(status.as_u16(), error_text));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice::<Resp>(&bytes)
        .map_err(|e| ProviderError::ParseError(format!("{} response: {}", provider, e)))
}

/// Join a base endpoint and an API path without doubling slashes
pub(crate) fn join_endpoint(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub mod cohere;
pub mod gemini;
pub mod mistral;
pub mod mock;
