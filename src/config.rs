//! Application configuration loaded from `config.toml`.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::common::constants::{DEFAULT_LOG_CLEANUP_DAYS, DEFAULT_LOG_DIR, DEFAULT_LOG_FILTER};
use crate::loader::utils::parse_time_field;
use crate::loader::VolumeProfileCsvLoader;
use crate::logging::{LogRotation, LoggingConfig};
use crate::volume_profile::TimestampMS;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_complete_day() -> bool {
    true
}

/// Profile source from config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub symbol: String,
    pub path: String,
    /// Date that `HH:mm:ss` fields are anchored to (default: today, UTC)
    #[serde(default)]
    pub trading_date: Option<NaiveDate>,
    /// Require bucket percentages to total 100.0 (default: true)
    #[serde(default = "default_complete_day")]
    pub complete_day: bool,
}

/// A query window; each side is `HH:mm:ss` or `dd/MM/yyyy HH:mm:ss`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryWindowConfig {
    pub start: String,
    pub end: String,
}

/// Logging configuration from config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingTomlConfig {
    pub log_dir: Option<String>,
    pub level_filter: Option<String>,
    pub rotation: Option<String>, // "daily" or "hourly"
    pub console_timestamps: Option<bool>,
    pub file_json_format: Option<bool>,
    pub cleanup_days: Option<u32>, // Days to keep log files
}

/// Full TOML configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub profile: ProfileConfig,
    #[serde(default)]
    pub queries: Vec<QueryWindowConfig>,
    pub logging: Option<LoggingTomlConfig>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.profile.symbol.trim().is_empty() {
            return Err("profile.symbol must not be empty".to_string());
        }
        if self.profile.path.trim().is_empty() {
            return Err("profile.path must not be empty".to_string());
        }
        self.query_windows().map(|_| ())
    }

    pub fn trading_date(&self) -> NaiveDate {
        self.profile
            .trading_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }

    /// Loader set up with the configured trading date and completeness rule
    pub fn loader(&self) -> VolumeProfileCsvLoader {
        VolumeProfileCsvLoader::new()
            .with_trading_date(self.trading_date())
            .with_complete_day(self.profile.complete_day)
    }

    /// Configured windows resolved to timestamps on the trading date
    pub fn query_windows(&self) -> Result<Vec<(TimestampMS, TimestampMS)>, String> {
        let trading_date = self.trading_date();
        self.queries
            .iter()
            .map(|q| {
                let start = parse_time_field(&q.start, trading_date)
                    .ok_or_else(|| format!("Invalid query start time: {}", q.start))?;
                let end = parse_time_field(&q.end, trading_date)
                    .ok_or_else(|| format!("Invalid query end time: {}", q.end))?;
                Ok((start, end))
            })
            .collect()
    }

    /// Convert logging section with fallback to defaults; also returns cleanup days
    pub fn logging_config(&self) -> (LoggingConfig, u32) {
        let Some(log_config) = self.logging.clone() else {
            return (LoggingConfig::default(), DEFAULT_LOG_CLEANUP_DAYS);
        };

        let rotation = log_config
            .rotation
            .as_deref()
            .map(LogRotation::from_config_value)
            .unwrap_or(LogRotation::Daily);

        let config = LoggingConfig {
            log_dir: log_config.log_dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            level_filter: log_config
                .level_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            rotation,
            console_timestamps: log_config.console_timestamps.unwrap_or(true),
            file_json_format: log_config.file_json_format.unwrap_or(false),
        };
        (config, log_config.cleanup_days.unwrap_or(DEFAULT_LOG_CLEANUP_DAYS))
    }
}
