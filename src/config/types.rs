use crate::error::ConfigError;
use crate::llm::SUPPORTED_PROVIDERS;
use crate::llm::http_client::DEFAULT_TIMEOUT_SECS;
use crate::prompt::FeedbackStyle;
use crate::rubric::{RubricCatalog, RubricDefinition};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_RUBRIC: &str = "Internal Assessment 1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - resolved at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    /// Overrides the provider's default endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Extra rubrics; a rubric named like a built-in replaces it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rubrics: Vec<RubricDefinition>,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.into()
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            provider_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            feedback: FeedbackConfig::default(),
            logging: LoggingConfig::default(),
            rubrics: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default)]
    pub default_style: FeedbackStyle,
    #[serde(default = "default_rubric")]
    pub default_rubric: String,
    /// Number of records shown by the history view.
    #[serde(default = "default_history_display")]
    pub history_display: usize,
}

fn default_rubric() -> String {
    DEFAULT_RUBRIC.into()
}

fn default_history_display() -> usize {
    5
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            default_style: FeedbackStyle::default(),
            default_rubric: default_rubric(),
            history_display: default_history_display(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<tracing::Level, ConfigError> {
        self.level.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "logging.level {:?} is not one of error, warn, info, debug, trace",
                self.level
            ))
        })
    }
}

impl Config {
    /// Rubrics available to commands: built-ins plus `[[rubrics]]`.
    pub fn catalog(&self) -> Result<RubricCatalog, ConfigError> {
        RubricCatalog::from_definitions(&self.rubrics)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::Validation(format!(
                "default_temperature {} must be between 0.0 and 2.0",
                self.default_temperature
            )));
        }

        let provider = self.default_provider.trim().to_ascii_lowercase();
        if !SUPPORTED_PROVIDERS.contains(&provider.as_str()) {
            return Err(ConfigError::Validation(format!(
                "default_provider {:?} is not supported (expected one of {})",
                self.default_provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_model must not be empty".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be at least 1".into(),
            ));
        }

        if self.feedback.history_display == 0 {
            return Err(ConfigError::Validation(
                "feedback.history_display must be at least 1".into(),
            ));
        }

        self.logging.max_level()?;

        let catalog = self.catalog()?;
        catalog
            .find(&self.feedback.default_rubric)
            .map_err(|e| ConfigError::Validation(format!("feedback.default_rubric: {e}")))?;

        Ok(())
    }
}
