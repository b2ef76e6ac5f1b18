/*!
 * Core humanizing orchestrator.
 *
 * The `Humanizer` segments the input, assigns sentence `i` to rewriter
 * `i mod N`, collects the results in original order and reports progress
 * after each sentence completes. Sentence failures never escape: rewriters
 * fall back to the original sentence on their own.
 */

use anyhow::{Result, anyhow};
use futures::stream::{self, StreamExt};
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use super::TextRewriter;
use super::dispatch::round_robin_index;
use crate::segmenter::split_into_sentences;

/// Result for one sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceRewrite {
    /// Position in the input
    pub index: usize,
    /// Name of the rewriter that handled it
    pub rewriter: String,
    /// Sentence as segmented from the input
    pub original: String,
    /// Rewritten sentence, or the original on failure
    pub rewritten: String,
}

/// Everything produced by one humanize run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HumanizeOutcome {
    /// Rewritten sentences joined by single spaces
    pub text: String,
    /// Per-sentence results in input order
    pub sentences: Vec<SentenceRewrite>,
}

impl HumanizeOutcome {
    /// Sentences handled per rewriter, in order of first use
    pub fn rewriter_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for sentence in &self.sentences {
            match counts.iter_mut().find(|(name, _)| *name == sentence.rewriter) {
                Some((_, count)) => *count += 1,
                None => counts.push((sentence.rewriter.clone(), 1)),
            }
        }
        counts
    }

    /// Sentences that came back identical to the input, including fallbacks
    pub fn unchanged_count(&self) -> usize {
        self.sentences
            .iter()
            .filter(|s| s.original == s.rewritten)
            .count()
    }
}

/// Orchestrates sentence rewriting across a fixed, ordered set of rewriters
pub struct Humanizer {
    rewriters: Vec<Arc<dyn TextRewriter>>,
    max_concurrent_requests: usize,
}

impl Humanizer {
    /// Create a humanizer over `rewriters`, used in the given order
    pub fn new(rewriters: Vec<Arc<dyn TextRewriter>>) -> Result<Self> {
        if rewriters.is_empty() {
            return Err(anyhow!("At least one rewriter is required"));
        }
        Ok(Self {
            rewriters,
            max_concurrent_requests: 1,
        })
    }

    /// Allow up to `limit` sentences in flight; results and progress stay in input order
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit.max(1);
        self
    }

    pub fn rewriter_names(&self) -> Vec<&str> {
        self.rewriters.iter().map(|r| r.name()).collect()
    }

    pub fn rewriters(&self) -> &[Arc<dyn TextRewriter>] {
        &self.rewriters
    }

    /// Rewrite `text` without progress reporting
    pub async fn humanize(&self, text: &str) -> String {
        self.humanize_with_progress(text, |_| {}).await
    }

    /// Rewrite `text`, calling `on_progress` with a percentage after each sentence
    ///
    /// `on_progress` is called exactly once per sentence, with strictly
    /// increasing values ending at exactly 100.0. It is never called for input
    /// that yields no sentences.
    pub async fn humanize_with_progress<F>(&self, text: &str, on_progress: F) -> String
    where
        F: Fn(f64) + Send + Sync,
    {
        self.humanize_detailed(text, on_progress).await.text
    }

    /// Rewrite `text` and keep the per-sentence breakdown
    pub async fn humanize_detailed<F>(&self, text: &str, on_progress: F) -> HumanizeOutcome
    where
        F: Fn(f64) + Send + Sync,
    {
        let sentences = split_into_sentences(text);
        let total = sentences.len();
        if total == 0 {
            return HumanizeOutcome::default();
        }

        info!(
            "Humanizing {} sentence(s) across {} provider(s)",
            total,
            self.rewriters.len()
        );
        let start_time = Instant::now();

        // `buffered` yields in submission order, so progress only advances
        // once every earlier sentence is done.
        let mut results = stream::iter(sentences.into_iter().enumerate())
            .map(|(index, original)| {
                let rewriter = Arc::clone(&self.rewriters[round_robin_index(index, self.rewriters.len())]);
                async move {
                    let rewritten = rewriter.rewrite(&original).await;
                    SentenceRewrite {
                        index,
                        rewriter: rewriter.name().to_string(),
                        original,
                        rewritten,
                    }
                }
            })
            .buffered(self.max_concurrent_requests);

        let mut completed = Vec::with_capacity(total);
        while let Some(result) = results.next().await {
            debug!("Sentence {} of {} done by {}", result.index + 1, total, result.rewriter);
            completed.push(result);
            on_progress(completed.len() as f64 / total as f64 * 100.0);
        }

        let text = completed
            .iter()
            .map(|s| s.rewritten.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        info!("Humanized {} sentence(s) in {:?}", total, start_time.elapsed());

        HumanizeOutcome {
            text,
            sentences: completed,
        }
    }
}
