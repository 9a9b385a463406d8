//! Configuration management for the vacancy normalizer
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The normalizer never reads configuration on its
//! own: a [`NormalizerConfig`] is handed to the assembler explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Normalization rules, sentinels and labels
    pub normalizer: NormalizerConfig,

    /// Batch pipeline configuration
    pub pipeline: PipelineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Sentinels, labels and tie-break policies used during normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Title used when no title, name or profession is present
    pub untitled_title: String,

    /// Employer name used when an employer has no usable name
    pub not_specified: String,

    /// Experience name used when an experience has no usable name
    pub experience_sentinel: String,

    /// Employment name used when an employment has no usable name
    pub employment_sentinel: String,

    /// Currency assumed when a salary carries none
    pub default_currency: String,

    /// Prefix of the synthesized description ("Vacancy: {title}")
    pub description_prefix: String,

    /// Label placed before requirements in a composed description
    pub requirements_label: String,

    /// Label placed before responsibilities in a composed description
    pub responsibilities_label: String,

    /// Swap salary bounds when `to` is lower than `from`
    pub swap_inverted_salary: bool,

    /// Minimum length of a section mined from a long description
    pub min_mined_section_len: usize,

    /// Provider tags and domain markers
    pub providers: ProviderConfig,
}

/// Provider tags and the domain markers used to recognise them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Tag of the HeadHunter-style provider
    pub hh_tag: String,

    /// Domain marker of the HeadHunter-style provider
    pub hh_marker: String,

    /// Tag of the SuperJob-style provider
    pub superjob_tag: String,

    /// Domain marker of the SuperJob-style provider
    pub superjob_marker: String,

    /// Tag used when the origin cannot be determined
    pub unknown_tag: String,
}

/// Batch pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of normalization workers
    pub workers: usize,

    /// Channel buffer size between producer and workers
    pub channel_buffer_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            untitled_title: String::from("Untitled"),
            not_specified: String::from("Not specified"),
            experience_sentinel: String::from("Not specified"),
            employment_sentinel: String::from("Not specified"),
            default_currency: String::from("RUR"),
            description_prefix: String::from("Vacancy"),
            requirements_label: String::from("Requirements"),
            responsibilities_label: String::from("Responsibilities"),
            swap_inverted_salary: true,
            min_mined_section_len: 10,
            providers: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            hh_tag: String::from("hh.ru"),
            hh_marker: String::from("hh.ru"),
            superjob_tag: String::from("superjob.ru"),
            superjob_marker: String::from("superjob.ru"),
            unknown_tag: String::from("unknown"),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            channel_buffer_size: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(currency) = std::env::var("RABOTA_DEFAULT_CURRENCY") {
            config.normalizer.default_currency = currency.trim().to_ascii_uppercase();
        }

        if let Ok(title) = std::env::var("RABOTA_UNTITLED") {
            config.normalizer.untitled_title = title;
        }

        if let Ok(name) = std::env::var("RABOTA_NOT_SPECIFIED") {
            config.normalizer.not_specified = name.clone();
            config.normalizer.experience_sentinel = name.clone();
            config.normalizer.employment_sentinel = name;
        }

        if let Some(swap) = std::env::var("RABOTA_SWAP_INVERTED_SALARY")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            config.normalizer.swap_inverted_salary = swap;
        }

        if let Some(workers) = std::env::var("RABOTA_WORKERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.pipeline.workers = workers;
        }

        if let Ok(level) = std::env::var("RABOTA_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("RABOTA_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.normalizer.validate()?;

        if self.pipeline.workers == 0 {
            anyhow::bail!("pipeline.workers must be greater than 0");
        }

        if self.pipeline.channel_buffer_size == 0 {
            anyhow::bail!("pipeline.channel_buffer_size must be greater than 0");
        }

        Ok(())
    }
}

impl NormalizerConfig {
    /// Validate sentinels, currency and provider markers
    pub fn validate(&self) -> Result<()> {
        let sentinels = [
            ("untitled_title", &self.untitled_title),
            ("not_specified", &self.not_specified),
            ("experience_sentinel", &self.experience_sentinel),
            ("employment_sentinel", &self.employment_sentinel),
            ("providers.unknown_tag", &self.providers.unknown_tag),
        ];
        for (name, value) in sentinels {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must not be empty");
            }
        }

        if !is_currency_code(&self.default_currency) {
            anyhow::bail!(
                "default_currency must be a three-letter code, got {:?}",
                self.default_currency
            );
        }

        let providers = &self.providers;
        if providers.hh_marker.trim().is_empty() || providers.superjob_marker.trim().is_empty() {
            anyhow::bail!("provider domain markers must not be empty");
        }
        if providers.hh_marker.eq_ignore_ascii_case(&providers.superjob_marker) {
            anyhow::bail!("provider domain markers must differ");
        }

        Ok(())
    }
}

/// Check for a three-letter ASCII currency code
pub fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_workers() {
        let mut config = Config::default();
        config.pipeline.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_currency() {
        let mut config = Config::default();
        config.normalizer.default_currency = "RUBLE".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_markers_rejected() {
        let mut config = NormalizerConfig::default();
        config.providers.superjob_marker = "HH.ru".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_sentinel_rejected() {
        let mut config = NormalizerConfig::default();
        config.untitled_title = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [normalizer]
            default_currency = "USD"

            [pipeline]
            workers = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.normalizer.default_currency, "USD");
        assert_eq!(config.normalizer.untitled_title, "Untitled");
        assert_eq!(config.pipeline.workers, 2);
        assert_eq!(config.pipeline.channel_buffer_size, 1000);
    }

    #[test]
    fn test_currency_code_check() {
        assert!(is_currency_code("RUR"));
        assert!(is_currency_code("usd"));
        assert!(!is_currency_code("RU"));
        assert!(!is_currency_code("R1R"));
    }
}
