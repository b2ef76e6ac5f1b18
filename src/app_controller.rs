use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, ProviderConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::providers::cohere::Cohere;
use crate::providers::gemini::Gemini;
use crate::providers::mistral::Mistral;
use crate::providers::mock::MockProvider;
use crate::readability::{ReadabilityMetrics, calculate_readability};
use crate::rewrite::{Humanizer, ProviderRewriter, StyleProfile, TextRewriter};
use crate::segmenter::word_count;

// @module: Application controller for humanize requests

/// Sentences handled by one provider during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderUsage {
    pub provider: String,
    pub sentences: usize,
}

/// Result of one humanize request
#[derive(Debug, Clone, Serialize)]
pub struct HumanizeReport {
    /// Words in the submitted text
    pub input_words: usize,
    /// Rewritten text
    pub output: String,
    /// Readability of `output`
    pub metrics: ReadabilityMetrics,
    /// Number of sentences processed
    pub sentence_count: usize,
    /// Sentences returned unchanged, including provider fallbacks
    pub unchanged_sentences: usize,
    /// Per-provider sentence counts in rotation order
    pub providers: Vec<ProviderUsage>,
    /// Wall-clock time of the run in milliseconds
    pub elapsed_ms: u128,
}

/// Build the rewriter for one configured provider
pub fn build_rewriter(provider: &ProviderConfig) -> Arc<dyn TextRewriter> {
    let timeout = Duration::from_secs(provider.timeout_secs);
    let endpoint = provider.effective_endpoint();
    let model = provider.effective_model();
    let profile = StyleProfile::for_provider(provider.provider_type);

    match provider.provider_type {
        ProviderKind::Gemini => Arc::new(ProviderRewriter::new(
            Gemini::with_timeout(provider.api_key.as_str(), endpoint, model, timeout),
            &profile,
        )),
        ProviderKind::Cohere => Arc::new(ProviderRewriter::new(
            Cohere::with_timeout(provider.api_key.as_str(), endpoint, model, timeout),
            &profile,
        )),
        ProviderKind::Mistral => Arc::new(ProviderRewriter::new(
            Mistral::with_timeout(provider.api_key.as_str(), endpoint, model, timeout),
            &profile,
        )),
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Orchestrator over the configured providers
    humanizer: Humanizer,
}

impl Controller {
    // @method: Create a controller talking to the configured providers
    pub fn with_config(config: Config) -> Result<Self> {
        let rewriters = config
            .active_providers()
            .into_iter()
            .map(|provider| {
                if provider.api_key.is_empty() {
                    warn!(
                        "No API key for {}; its sentences will be kept unchanged",
                        provider.provider_type.display_name()
                    );
                }
                build_rewriter(provider)
            })
            .collect();
        Self::with_rewriters(config, rewriters)
    }

    /// Create a controller whose providers echo sentences back without any network access
    pub fn dry_run(config: Config) -> Result<Self> {
        let rewriters = config
            .active_providers()
            .into_iter()
            .map(|provider| {
                let mock = MockProvider::echo()
                    .with_name(format!("{} (dry run)", provider.provider_type.display_name()));
                let profile = StyleProfile::for_provider(provider.provider_type);
                Arc::new(ProviderRewriter::new(mock, &profile)) as Arc<dyn TextRewriter>
            })
            .collect();
        Self::with_rewriters(config, rewriters)
    }

    /// Create a controller over an explicit rewriter set
    pub fn with_rewriters(config: Config, rewriters: Vec<Arc<dyn TextRewriter>>) -> Result<Self> {
        let humanizer =
            Humanizer::new(rewriters)?.with_concurrency(config.common.concurrent_requests);
        Ok(Self { config, humanizer })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn humanizer(&self) -> &Humanizer {
        &self.humanizer
    }

    /// Humanize `text` with a terminal progress bar
    pub async fn run(&self, text: &str) -> Result<HumanizeReport> {
        let progress_bar = ProgressBar::new(100);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}% {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("=>-"));
        progress_bar.set_message("Humanizing");

        let pb = progress_bar.clone();
        let result = self
            .run_with_progress(text, move |percent| pb.set_position(percent.round() as u64))
            .await;

        // Finish and clear the progress bar so the next run starts from zero
        progress_bar.finish_and_clear();
        result
    }

    /// Humanize `text`, reporting progress percentages to `on_progress`
    pub async fn run_with_progress<F>(&self, text: &str, on_progress: F) -> Result<HumanizeReport>
    where
        F: Fn(f64) + Send + Sync,
    {
        if text.trim().is_empty() {
            return Err(anyhow!("Input text is empty"));
        }

        let start_time = Instant::now();
        let outcome = self.humanizer.humanize_detailed(text, on_progress).await;
        let metrics = calculate_readability(&outcome.text);

        let report = HumanizeReport {
            input_words: word_count(text),
            sentence_count: outcome.sentences.len(),
            unchanged_sentences: outcome.unchanged_count(),
            providers: outcome
                .rewriter_counts()
                .into_iter()
                .map(|(provider, sentences)| ProviderUsage { provider, sentences })
                .collect(),
            metrics,
            output: outcome.text,
            elapsed_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Humanize complete in {}: {} sentence(s), readability {} ({})",
            Self::format_duration(start_time.elapsed()),
            report.sentence_count,
            report.metrics.readability,
            report.metrics.readability_label
        );

        Ok(report)
    }

    /// Ping every provider, in rotation order
    pub async fn check_providers(&self) -> Vec<(String, Result<(), ProviderError>)> {
        let mut results = Vec::new();
        for rewriter in self.humanizer.rewriters() {
            let result = rewriter.check().await;
            results.push((rewriter.name().to_string(), result));
        }
        results
    }

    /// Format a duration as e.g. `1m 05s` or `850ms`
    pub fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs == 0 {
            return format!("{}ms", duration.as_millis());
        }
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        if minutes > 0 {
            format!("{}m {:02}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
