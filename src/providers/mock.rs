/*!
 * Mock provider implementation for dry runs and testing.
 *
 * The mock never touches the network. Its behaviour is selected up front:
 * - `MockProvider::echo()` - Always succeeds, returning the sentence unchanged
 * - `MockProvider::quoted()` - Succeeds, wrapping the sentence in quotes
 * - `MockProvider::intermittent(n)` - Fails every n-th request
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds without any text
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::rewrite::prompts::sentence_from_prompt;

/// Mock request
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// Full prompt as the real providers would receive it
    pub prompt: String,
    /// Sentence recovered from the prompt
    pub sentence: String,
}

/// Mock response
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Generated text, `None` to simulate a response without the text field
    pub text: Option<String>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, echoing the sentence
    Echo,
    /// Succeeds, but wraps the sentence in double quotes
    Quoted,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns a response with no text
    Empty,
    /// Simulates a slow response before echoing
    Slow { delay_ms: u64 },
}

/// Mock provider for testing rewriting behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Name reported in logs
    name: String,
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator used by the succeeding behaviors
    custom_response: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            name: "Mock".to_string(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn quoted() -> Self {
        Self::new(MockBehavior::Quoted)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set the name reported in logs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn success_text(&self, request: &MockRequest) -> String {
        match self.custom_response {
            Some(generator) => generator(request),
            None => request.sentence.clone(),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    fn name(&self) -> &str {
        &self.name
    }

    fn build_request(&self, prompt: &str) -> Self::Request {
        MockRequest {
            prompt: prompt.to_string(),
            sentence: sentence_from_prompt(prompt).to_string(),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Echo => Ok(MockResponse {
                text: Some(self.success_text(&request)),
            }),

            MockBehavior::Quoted => Ok(MockResponse {
                text: Some(format!("\"{}\"", self.success_text(&request))),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(MockResponse {
                        text: Some(self.success_text(&request)),
                    })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(MockResponse { text: None }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(MockResponse {
                    text: Some(self.success_text(&request)),
                })
            }
        }
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response.text.clone()
    }
}
