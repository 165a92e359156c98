//! Console + rolling-file logging for the volume profile binary.
//!
//! Console output stays human-readable; the rolling file can be switched to
//! JSON for post-run analysis of profile loads and slicing queries.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::common::constants::{DEFAULT_LOG_DIR, DEFAULT_LOG_FILTER};

const LOG_FILE_NAME: &str = "intraday_volume.log";
const CONSOLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";
const FILE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

type InitResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: String,
    /// EnvFilter directive, overridden by `RUST_LOG` when set
    pub level_filter: String,
    pub rotation: LogRotation,
    pub console_timestamps: bool,
    pub file_json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: DEFAULT_LOG_DIR.to_string(),
            level_filter: DEFAULT_LOG_FILTER.to_string(),
            rotation: LogRotation::Daily,
            console_timestamps: true,
            file_json_format: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Daily,
    Hourly,
}

impl LogRotation {
    /// `"hourly"` selects hourly files; anything else rotates daily
    pub fn from_config_value(value: &str) -> Self {
        match value.trim() {
            "hourly" => LogRotation::Hourly,
            _ => LogRotation::Daily,
        }
    }

    fn appender(self, log_dir: &str) -> RollingFileAppender {
        match self {
            LogRotation::Daily => rolling::daily(log_dir, LOG_FILE_NAME),
            LogRotation::Hourly => rolling::hourly(log_dir, LOG_FILE_NAME),
        }
    }
}

fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level_filter))
}

/// Install console and rolling-file layers on the global subscriber.
///
/// Files land in `log_dir` as `intraday_volume.log.YYYY-MM-DD` (or `-HH` when
/// hourly). The returned guard flushes the file writer on drop, so hold it
/// until the process exits.
pub fn init_dual_logging(config: LoggingConfig) -> InitResult<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let (file_writer, guard) = non_blocking(config.rotation.appender(&config.log_dir));

    let console_timer = ChronoUtc::new(if config.console_timestamps {
        CONSOLE_TIME_FORMAT.to_string()
    } else {
        String::new()
    });
    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_timer(console_timer)
        .with_filter(level_filter(&config));

    let file_base = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_timer(ChronoUtc::new(FILE_TIME_FORMAT.to_string()));
    let file_layer = if config.file_json_format {
        file_base.json().with_filter(level_filter(&config)).boxed()
    } else {
        file_base.with_filter(level_filter(&config)).boxed()
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        log_dir = %config.log_dir,
        rotation = ?config.rotation,
        json_format = config.file_json_format,
        "📁 Logging to console and rolling files"
    );
    Ok(guard)
}

/// Console-only fallback when the file layer cannot be set up
pub fn init_simple_logging() -> InitResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(DEFAULT_LOG_FILTER)
        .try_init()?;
    tracing::info!("🖥️ Console-only logging");
    Ok(())
}

fn is_profile_log(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_NAME))
}

/// Log files written by this crate in `log_dir`, sorted by name
pub fn get_current_log_files(log_dir: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(log_dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_profile_log(path))
        .collect();
    files.sort();
    files
}

/// Remove this crate's log files last modified more than `keep_days` ago
pub fn cleanup_old_logs(log_dir: &str, keep_days: u32) -> Result<usize, std::io::Error> {
    let retention = Duration::from_secs(u64::from(keep_days) * 24 * 3600);
    let cutoff = SystemTime::now()
        .checked_sub(retention)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let removed = get_current_log_files(log_dir)
        .into_iter()
        .filter(|path| {
            path.metadata()
                .and_then(|meta| meta.modified())
                .is_ok_and(|modified| modified < cutoff)
        })
        .filter(|path| std::fs::remove_file(path).is_ok())
        .inspect(|path| tracing::debug!(path = %path.display(), "🗑️ Removed old log file"))
        .count();

    if removed > 0 {
        tracing::info!(removed, keep_days, "🧹 Cleaned up old log files");
    }
    Ok(removed)
}
