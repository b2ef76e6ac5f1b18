use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Rewriting providers, in round-robin order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Settings shared by every provider
    #[serde(default)]
    pub common: RewriteCommonConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Remote rewriting service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google Gemini
    Gemini,
    // @provider: Cohere
    Cohere,
    // @provider: Mistral
    Mistral,
}

impl ProviderKind {
    /// All providers in their reference round-robin order
    pub const ALL: [ProviderKind; 3] = [Self::Gemini, Self::Cohere, Self::Mistral];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Cohere => "Cohere",
            Self::Mistral => "Mistral",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Cohere => "cohere".to_string(),
            Self::Mistral => "mistral".to_string(),
        }
    }

    /// Environment variable consulted for this provider's API key
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Cohere => "COHERE_API_KEY",
            Self::Mistral => "MISTRAL_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "cohere" => Ok(Self::Cohere),
            "mistral" => Ok(Self::Mistral),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: ProviderKind,

    // @field: Whether this provider takes part in the rotation
    #[serde(default = "default_true")]
    pub enabled: bool,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProviderKind) -> Self {
        Self {
            provider_type,
            enabled: true,
            model: default_model(provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Configured model, or the provider default when blank
    pub fn effective_model(&self) -> String {
        if self.model.is_empty() {
            default_model(self.provider_type)
        } else {
            self.model.clone()
        }
    }

    /// Configured endpoint, or the provider default when blank
    pub fn effective_endpoint(&self) -> String {
        if self.endpoint.is_empty() {
            default_endpoint(self.provider_type)
        } else {
            self.endpoint.clone()
        }
    }
}

/// Settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RewriteCommonConfig {
    /// Sentences in flight at once; 1 dispatches strictly one after another
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
}

impl Default for RewriteCommonConfig {
    fn default() -> Self {
        Self {
            concurrent_requests: default_concurrent_requests(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Selections made on the command line that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Providers to rotate over, in order; empty keeps the file's list
    pub providers: Vec<ProviderKind>,

    /// Maximum sentences in flight at once
    pub concurrency: Option<usize>,
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_providers() -> Vec<ProviderConfig> {
    ProviderKind::ALL.into_iter().map(ProviderConfig::new).collect()
}

fn default_endpoint(provider: ProviderKind) -> String {
    match provider {
        ProviderKind::Gemini => "https://generativelanguage.googleapis.com".to_string(),
        ProviderKind::Cohere => "https://api.cohere.com".to_string(),
        ProviderKind::Mistral => "https://api.mistral.ai".to_string(),
    }
}

fn default_model(provider: ProviderKind) -> String {
    match provider {
        ProviderKind::Gemini => "gemini-2.0-flash-exp".to_string(),
        ProviderKind::Cohere => "command-r-plus-08-2024".to_string(),
        ProviderKind::Mistral => "mistral-medium-2508".to_string(),
    }
}

impl Config {
    /// Load a configuration file, creating one with defaults if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Apply command line overrides, then fill blank API keys from the process environment
    pub fn apply_env_overrides(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        self.apply_overrides(overrides, |var| std::env::var(var).ok())
    }

    /// Apply command line overrides, then fill blank API keys using `lookup`
    ///
    /// Keys are filled last so providers added by the provider selection
    /// pick up their environment key too.
    pub fn apply_overrides<F>(&mut self, overrides: &ConfigOverrides, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !overrides.providers.is_empty() {
            self.restrict_providers(&overrides.providers)?;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.common.concurrent_requests = concurrency;
        }
        self.apply_key_overrides(lookup);
        Ok(())
    }

    /// Fill blank API keys using `lookup(env_var_name)`
    pub fn apply_key_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for provider in &mut self.providers {
            if !provider.api_key.is_empty() {
                continue;
            }
            if let Some(key) = lookup(provider.provider_type.api_key_env_var()) {
                let key = key.trim().to_string();
                if !key.is_empty() {
                    provider.api_key = key;
                }
            }
        }
    }

    /// Keep only the listed providers, in the listed order
    pub fn restrict_providers(&mut self, kinds: &[ProviderKind]) -> Result<()> {
        let mut selected = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let mut provider = self
                .providers
                .iter()
                .find(|p| p.provider_type == *kind)
                .cloned()
                .unwrap_or_else(|| ProviderConfig::new(*kind));
            provider.enabled = true;
            selected.push(provider);
        }
        if selected.is_empty() {
            return Err(anyhow!("At least one provider must be selected"));
        }
        self.providers = selected;
        Ok(())
    }

    /// Enabled providers in rotation order
    pub fn active_providers(&self) -> Vec<&ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled).collect()
    }

    /// Validate the configuration for consistency and required values
    ///
    /// A missing API key is not an error here: the affected provider simply
    /// falls back to the original sentence at request time.
    pub fn validate(&self) -> Result<()> {
        let active = self.active_providers();
        if active.is_empty() {
            return Err(anyhow!("At least one provider must be enabled"));
        }

        for provider in active {
            let endpoint = provider.effective_endpoint();
            Url::parse(&endpoint).with_context(|| {
                format!("Invalid endpoint for {}: {}", provider.provider_type.display_name(), endpoint)
            })?;
            if provider.timeout_secs == 0 {
                return Err(anyhow!(
                    "Timeout for {} must be greater than zero",
                    provider.provider_type.display_name()
                ));
            }
        }

        if self.common.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            providers: default_providers(),
            common: RewriteCommonConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
