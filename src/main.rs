use intraday_volume::common::constants::DEFAULT_CONFIG_PATH;
use intraday_volume::config::AppConfig;
use intraday_volume::common::formatting::format_time;
use intraday_volume::logging::{cleanup_old_logs, init_dual_logging};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match AppConfig::from_toml(&config_path) {
        Ok(config) => {
            // Simple print until logging is initialized
            println!("✅ Loaded configuration from {config_path}");
            config
        }
        Err(e) => {
            eprintln!("❌ Failed to load {config_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (logging_config, cleanup_days) = config.logging_config();
    let _logging_guard = match init_dual_logging(logging_config.clone()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("❌ Failed to initialize logging system: {e}");
            let _ = intraday_volume::logging::init_simple_logging();
            warn!("⚠️ Using fallback console-only logging due to error: {}", e);
            None
        }
    };

    if let Err(e) = cleanup_old_logs(&logging_config.log_dir, cleanup_days) {
        warn!("⚠️ Failed to clean up old log files: {}", e);
    }

    info!(
        symbol = %config.profile.symbol,
        path = %config.profile.path,
        trading_date = %config.trading_date(),
        complete_day = config.profile.complete_day,
        queries = config.queries.len(),
        "🔧 Configuration loaded"
    );

    let profile = match config
        .loader()
        .load_volume_profile(&config.profile.symbol, &config.profile.path)
    {
        Ok(profile) => profile,
        Err(e) => {
            error!(error = %e, "❌ Failed to load volume profile");
            return ExitCode::FAILURE;
        }
    };

    let windows = match config.query_windows() {
        Ok(windows) => windows,
        Err(e) => {
            error!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    if windows.is_empty() {
        print!("{}", profile.to_multi_line_string());
        return ExitCode::SUCCESS;
    }

    for (start_time, end_time) in windows {
        let sub_profile = profile.cumulative_volume_profile(start_time, end_time);
        let target_percent = sub_profile.total_percent();
        info!(
            start = %format_time(start_time),
            end = %format_time(end_time),
            bucket_count = sub_profile.len(),
            target_percent,
            "🎯 Target participation computed"
        );
        println!(
            "[{}, {}) target={:.6}%",
            format_time(start_time),
            format_time(end_time),
            target_percent
        );
        print!("{}", sub_profile.to_multi_line_string());
    }

    ExitCode::SUCCESS
}
