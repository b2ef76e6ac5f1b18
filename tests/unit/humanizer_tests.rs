/*!
 * Tests for the humanize orchestrator
 */

use anyhow::Result;
use std::sync::{Arc, Mutex};

use humanizer::providers::mock::MockProvider;
use humanizer::rewrite::dispatch::assignment_plan;
use humanizer::rewrite::{Humanizer, ProviderRewriter, TextRewriter};

use crate::common::{self, RecordingRewriter};

const SEVEN_SENTENCES: &str = "One. Two. Three. Four. Five. Six. Seven.";

fn collector() -> (Arc<Mutex<Vec<f64>>>, impl Fn(f64) + Send + Sync) {
    let values = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&values);
    (values, move |p| sink.lock().unwrap().push(p))
}

#[tokio::test]
async fn test_humanize_withThreeRewriters_shouldRotateAndJoin() -> Result<()> {
    common::init_test_logger();
    let a = RecordingRewriter::new("A");
    let b = RecordingRewriter::new("B");
    let c = RecordingRewriter::new("C");
    let humanizer = Humanizer::new(vec![
        a.clone() as Arc<dyn TextRewriter>,
        b.clone() as Arc<dyn TextRewriter>,
        c.clone() as Arc<dyn TextRewriter>,
    ])?;

    let output = humanizer.humanize(SEVEN_SENTENCES).await;

    assert_eq!(
        output,
        "A(One.) B(Two.) C(Three.) A(Four.) B(Five.) C(Six.) A(Seven.)"
    );
    assert_eq!(a.seen(), vec!["One.", "Four.", "Seven."]);
    assert_eq!(b.seen(), vec!["Two.", "Five."]);
    assert_eq!(c.seen(), vec!["Three.", "Six."]);
    assert_eq!(assignment_plan(7, 3), vec![0, 1, 2, 0, 1, 2, 0]);
    Ok(())
}

#[tokio::test]
async fn test_humanize_withProgress_shouldReportEverySentenceUpToHundred() -> Result<()> {
    let humanizer = Humanizer::new(vec![RecordingRewriter::new("A") as Arc<dyn TextRewriter>])?;
    let (values, on_progress) = collector();

    humanizer.humanize_with_progress(SEVEN_SENTENCES, on_progress).await;

    let values = values.lock().unwrap().clone();
    assert_eq!(values.len(), 7);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(values.last().copied(), Some(100.0));
    for (i, value) in values.iter().enumerate() {
        let expected = (i + 1) as f64 / 7.0 * 100.0;
        assert!((value - expected).abs() < 1e-9);
    }
    Ok(())
}

#[tokio::test]
async fn test_humanize_withBlankInput_shouldSkipRewritersAndProgress() -> Result<()> {
    let rewriter = RecordingRewriter::new("A");
    let humanizer = Humanizer::new(vec![rewriter.clone() as Arc<dyn TextRewriter>])?;
    let (values, on_progress) = collector();

    let output = humanizer.humanize_with_progress("   ", on_progress).await;

    assert_eq!(output, "");
    assert!(rewriter.seen().is_empty());
    assert!(values.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_humanize_withSingleSentence_shouldReportHundredOnce() -> Result<()> {
    let humanizer = Humanizer::new(vec![RecordingRewriter::new("A") as Arc<dyn TextRewriter>])?;
    let (values, on_progress) = collector();

    let output = humanizer.humanize_with_progress("no terminator at all", on_progress).await;

    assert_eq!(output, "A(no terminator at all)");
    assert_eq!(*values.lock().unwrap(), vec![100.0]);
    Ok(())
}

#[test]
fn test_new_withNoRewriters_shouldFail() {
    assert!(Humanizer::new(Vec::new()).is_err());
}

#[tokio::test]
async fn test_humanize_withIntermittentProvider_shouldKeepFailedSentences() -> Result<()> {
    let provider = MockProvider::intermittent(2).with_custom_response(|req| req.sentence.to_uppercase());
    let counter = provider.clone();
    let rewriter: Arc<dyn TextRewriter> = Arc::new(ProviderRewriter::with_instruction(provider, "Rewrite."));
    let humanizer = Humanizer::new(vec![rewriter])?;

    let outcome = humanizer
        .humanize_detailed("First one. Second one. Third one. Fourth one.", |_| {})
        .await;

    assert_eq!(outcome.text, "FIRST ONE. Second one. THIRD ONE. Fourth one.");
    assert_eq!(outcome.unchanged_count(), 2);
    assert_eq!(counter.request_count(), 4);
    Ok(())
}

#[tokio::test]
async fn test_humanize_withConcurrency_shouldKeepInputOrder() -> Result<()> {
    let slow: Arc<dyn TextRewriter> = Arc::new(ProviderRewriter::with_instruction(
        MockProvider::slow(40).with_name("Slow"),
        "Rewrite.",
    ));
    let fast: Arc<dyn TextRewriter> = Arc::new(ProviderRewriter::with_instruction(
        MockProvider::echo().with_name("Fast"),
        "Rewrite.",
    ));
    let humanizer = Humanizer::new(vec![slow, fast])?.with_concurrency(4);
    let (values, on_progress) = collector();

    let outcome = humanizer.humanize_detailed(SEVEN_SENTENCES, on_progress).await;

    assert_eq!(outcome.text, SEVEN_SENTENCES);
    let indices: Vec<usize> = outcome.sentences.iter().map(|s| s.index).collect();
    assert_eq!(indices, (0..7).collect::<Vec<_>>());
    assert_eq!(
        outcome.rewriter_counts(),
        vec![("Slow".to_string(), 4), ("Fast".to_string(), 3)]
    );
    assert_eq!(values.lock().unwrap().len(), 7);
    Ok(())
}
