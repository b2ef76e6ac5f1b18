/*!
 * Sentence rewriting pipeline.
 *
 * This module contains the orchestration that turns AI-sounding prose into
 * rewritten prose, one sentence at a time:
 *
 * - `prompts`: Per-provider style profiles and prompt construction
 * - `adapter`: Wraps a wire-level provider into an infallible rewriter
 * - `dispatch`: Round-robin assignment of sentences to rewriters
 * - `core`: The `Humanizer` orchestrator with progress reporting
 */

use async_trait::async_trait;

use crate::errors::ProviderError;

/// A service that rewrites one sentence at a time
///
/// `rewrite` never fails: implementations recover from their own errors and
/// hand back the original sentence instead.
#[async_trait]
pub trait TextRewriter: Send + Sync {
    /// Name used in logs and reports
    fn name(&self) -> &str;

    /// Rewrite a single sentence
    async fn rewrite(&self, sentence: &str) -> String;

    /// Check that the backing service is reachable
    async fn check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

// Re-export main types for easier usage
pub use self::adapter::{ProviderRewriter, normalize_rewrite};
pub use self::core::{HumanizeOutcome, Humanizer};
pub use self::dispatch::round_robin_index;
pub use self::prompts::StyleProfile;

// Submodules
pub mod adapter;
pub mod core;
pub mod dispatch;
pub mod prompts;
