/*!
 * Error types for the humanizer application.
 *
 * This module contains the error type for the provider boundary, using the
 * thiserror crate for ergonomic error definitions. Everything above that
 * boundary reports through anyhow.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
///
/// These never cross the rewriter boundary: the adapter logs them and falls
/// back to the original sentence.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication (including a missing credential)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The response was well-formed but carried no usable text
    #[error("Provider returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Map a non-success HTTP status and body to the matching error variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL can carry a credential (Gemini's `?key=`)
        let error = error.without_url();
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}
