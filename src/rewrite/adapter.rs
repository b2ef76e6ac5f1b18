/*!
 * Provider adapter: turns any [`Provider`] into an infallible [`TextRewriter`].
 */

use async_trait::async_trait;
use log::{debug, warn};

use super::TextRewriter;
use super::prompts::{FORBIDDEN_MARK, StyleProfile, build_prompt};
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Rewrites sentences through one provider using a fixed instruction payload
#[derive(Debug)]
pub struct ProviderRewriter<P: Provider> {
    provider: P,
    instruction: String,
}

impl<P: Provider> ProviderRewriter<P> {
    /// Create a rewriter that sends `profile`'s instruction with every sentence
    pub fn new(provider: P, profile: &StyleProfile) -> Self {
        Self::with_instruction(provider, profile.instruction())
    }

    /// Create a rewriter with a raw instruction text
    pub fn with_instruction(provider: P, instruction: impl Into<String>) -> Self {
        Self {
            provider,
            instruction: instruction.into(),
        }
    }

    /// Rewrite `sentence`, surfacing any provider failure
    pub async fn try_rewrite(&self, sentence: &str) -> Result<String, ProviderError> {
        let request = self.provider.build_request(&build_prompt(&self.instruction, sentence));
        let response = self.provider.complete(request).await?;

        let text = P::extract_text(&response).ok_or(ProviderError::EmptyResponse)?;
        let text = normalize_rewrite(&text);
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    /// Check that the provider answers at all
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }
}

#[async_trait]
impl<P: Provider + 'static> TextRewriter for ProviderRewriter<P> {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn rewrite(&self, sentence: &str) -> String {
        match self.try_rewrite(sentence).await {
            Ok(text) => {
                debug!("{} rewrote: {:?} -> {:?}", self.name(), sentence, text);
                text
            }
            Err(e) => {
                warn!("{} failed, keeping original sentence: {}", self.name(), e);
                sentence.to_string()
            }
        }
    }

    async fn check(&self) -> Result<(), ProviderError> {
        self.test_connection().await
    }
}

/// Clean up a provider's answer
///
/// Trims it, strips one layer of quotes when the same quote character sits at
/// both ends, and replaces the forbidden em dash with a plain hyphen.
pub fn normalize_rewrite(text: &str) -> String {
    let trimmed = text.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(trimmed);

    unquoted.replace(FORBIDDEN_MARK, "-")
}
