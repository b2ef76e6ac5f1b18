// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use humanizer::app_config::{self, Config, ConfigOverrides, ProviderKind};
use humanizer::app_controller::{Controller, HumanizeReport};
use humanizer::file_utils::FileManager;
use humanizer::readability::{ReadabilityMetrics, calculate_readability};

/// CLI Wrapper for ProviderKind to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliProvider {
    Gemini,
    Cohere,
    Mistral,
}

impl From<CliProvider> for ProviderKind {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Gemini => ProviderKind::Gemini,
            CliProvider::Cohere => ProviderKind::Cohere,
            CliProvider::Mistral => ProviderKind::Mistral,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite text through the provider rotation (default command)
    Humanize(HumanizeArgs),

    /// Print readability metrics without rewriting anything
    Score {
        /// Input text file, or '-' for stdin
        #[arg(value_name = "INPUT_PATH")]
        input_path: Option<PathBuf>,

        /// Print metrics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test the connection to every configured provider
    Check,

    /// Generate shell completions for humanizer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct HumanizeArgs {
    /// Input text file, or '-' for stdin (stdin when omitted)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Write the rewritten text to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Run the pipeline with echoing providers and no network access
    #[arg(long)]
    dry_run: bool,
}

/// Humanizer - rewrite AI-generated text with a rotation of LLM providers
///
/// Splits text into sentences, sends each sentence to Gemini, Cohere or Mistral
/// in turn, and reassembles the rewritten text along with a readability score.
#[derive(Parser, Debug)]
#[command(name = "humanizer")]
#[command(version)]
#[command(about = "Rewrite AI-generated text so it reads like a person wrote it")]
#[command(long_about = "Humanizer splits text into sentences and rewrites each one through a rotation of LLM providers.

EXAMPLES:
    humanizer draft.txt                        # Rewrite a file, print to stdout
    cat draft.txt | humanizer                  # Rewrite from stdin
    humanizer draft.txt -o final.txt           # Write the result to a file
    humanizer --providers gemini,mistral a.txt # Rotate over two providers only
    humanizer --concurrency 3 draft.txt        # Keep up to three requests in flight
    humanizer draft.txt --dry-run              # Exercise the pipeline offline
    humanizer score final.txt                  # Readability metrics only
    humanizer check                            # Test provider connectivity
    humanizer completions bash > humanizer.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. Empty API keys are filled from GEMINI_API_KEY,
    COHERE_API_KEY and MISTRAL_API_KEY.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    humanize: HumanizeArgs,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Providers to rotate over, in order (e.g. gemini,cohere,mistral)
    #[arg(short, long, value_enum, value_delimiter = ',', global = true)]
    providers: Vec<CliProvider>,

    /// Maximum sentences in flight at once
    #[arg(long, global = true)]
    concurrency: Option<usize>,
}

// @struct: Custom logger implementation
// Filtering is driven by the global max level so it can be refined after the config loads
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once; the level is refined after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.level_filter());
    }

    match &cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "humanizer", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Score { input_path, json }) => run_score(input_path.clone(), *json),
        Some(Commands::Check) => run_check(&cli).await,
        Some(Commands::Humanize(args)) => run_humanize(&cli, args).await,
        None => run_humanize(&cli, &cli.humanize).await,
    }
}

/// Load the config file and apply environment and command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    // Provider selection comes before key lookup so added providers get their env key
    let overrides = ConfigOverrides {
        providers: cli.providers.iter().map(|p| (*p).into()).collect(),
        concurrency: cli.concurrency,
    };
    config.apply_env_overrides(&overrides)?;

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.level_filter()),
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_humanize(cli: &CommandLineOptions, args: &HumanizeArgs) -> Result<()> {
    let config = load_config(cli)?;

    if let Some(output) = &args.output {
        if FileManager::file_exists(output) && !args.force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output
            ));
        }
    }

    let controller = if args.dry_run {
        info!("Dry run: sentences are echoed back without contacting any provider");
        Controller::dry_run(config)?
    } else {
        Controller::with_config(config)?
    };

    let text = FileManager::read_input(args.input_path.as_deref())?;
    let report = controller.run(&text).await?;

    if report.unchanged_sentences > 0 && !args.dry_run {
        warn!(
            "{} of {} sentence(s) were kept unchanged",
            report.unchanged_sentences, report.sentence_count
        );
    }

    if let Some(output) = &args.output {
        FileManager::write_to_file(output, &report.output)?;
        info!("Success: {:?}", output);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if args.output.is_none() {
            println!("{}", report.output);
        }
        print_report_summary(&report);
    }

    Ok(())
}

fn run_score(input_path: Option<PathBuf>, json: bool) -> Result<()> {
    let text = FileManager::read_input(input_path.as_deref())?;
    let metrics = calculate_readability(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("{}", format_metrics(&metrics));
    }
    Ok(())
}

async fn run_check(cli: &CommandLineOptions) -> Result<()> {
    let config = load_config(cli)?;
    let controller = Controller::with_config(config)?;

    let mut failures = 0;
    for (name, result) in controller.check_providers().await {
        match result {
            Ok(()) => info!("{}: OK", name),
            Err(e) => {
                failures += 1;
                error!("{}: {}", name, e);
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} provider(s) failed the connection test", failures));
    }
    Ok(())
}

fn format_metrics(metrics: &ReadabilityMetrics) -> String {
    format!(
        "Words: {} | Characters: {} | Readability: {} ({})",
        metrics.words, metrics.characters, metrics.readability, metrics.readability_label
    )
}

fn print_report_summary(report: &HumanizeReport) {
    let usage = report
        .providers
        .iter()
        .map(|p| format!("{} x{}", p.provider, p.sentences))
        .collect::<Vec<_>>()
        .join(", ");

    eprintln!();
    eprintln!("{}", format_metrics(&report.metrics));
    eprintln!(
        "Input words: {} | Sentences: {} ({}) | Time: {}",
        report.input_words,
        report.sentence_count,
        usage,
        Controller::format_duration(std::time::Duration::from_millis(report.elapsed_ms as u64))
    );
}
