/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;

use humanizer::app_config::{Config, ConfigOverrides, ProviderKind};
use humanizer::app_controller::Controller;
use humanizer::file_utils::FileManager;

use crate::common;

/// Config file on disk through to a written output file, without network access
#[tokio::test]
async fn test_lifecycle_withDryRun_shouldReadScoreAndWrite() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let config_path = dir.path().join("conf.json");
    let input = common::create_test_file(
        dir.path(),
        "draft.txt",
        "This is a draft. It has three sentences. The end!",
    )?;

    let mut config = Config::load_or_create(&config_path)?;
    let overrides = ConfigOverrides {
        providers: vec![ProviderKind::Cohere, ProviderKind::Mistral],
        concurrency: None,
    };
    config.apply_overrides(&overrides, |_| None)?;
    config.validate()?;

    let controller = Controller::dry_run(config)?;
    let text = FileManager::read_input(Some(&input))?;
    let report = controller.run(&text).await?;

    let output_path = dir.path().join("out").join("final.txt");
    FileManager::write_to_file(&output_path, &report.output)?;

    assert_eq!(FileManager::read_to_string(&output_path)?, text);
    assert_eq!(report.sentence_count, 3);
    assert_eq!(report.providers[0].provider, "Cohere (dry run)");
    assert_eq!(report.providers[0].sentences, 2);
    assert_eq!(report.providers[1].provider, "Mistral (dry run)");
    Ok(())
}

#[test]
fn test_controller_withDefaultConfig_shouldInitializeWithoutKeys() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().providers.len(), 3);
    assert_eq!(controller.humanizer().rewriters().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_controller_withoutKeys_shouldReturnInputUnchanged() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let report = controller
        .run_with_progress("Nothing is sent. Everything stays.", |_| {})
        .await?;

    assert_eq!(report.output, "Nothing is sent. Everything stays.");
    assert_eq!(report.unchanged_sentences, 2);
    Ok(())
}

#[test]
fn test_report_json_shouldExposeMetricsAndUsage() -> Result<()> {
    let controller = Controller::dry_run(Config::default())?;
    let report = tokio_test::block_on(controller.run_with_progress("Short one. Short two.", |_| {}))?;

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["output"], "Short one. Short two.");
    assert_eq!(json["metrics"]["words"], 4);
    assert!(json["metrics"]["readabilityLabel"].is_string());
    assert_eq!(json["providers"][0]["provider"], "Gemini (dry run)");
    Ok(())
}
