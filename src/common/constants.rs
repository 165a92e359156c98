/// Volume profile numeric constants
// Tolerance used when comparing percentages
pub const EPSILON: f64 = 0.000001;
// Sum of all bucket percentages for a complete trading day
pub const FULL_DAY_PERCENT: f64 = 100.0;

// Time constants
pub const MILLISECONDS_PER_SECOND: i64 = 1000;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const MILLISECONDS_PER_MINUTE: i64 = MILLISECONDS_PER_SECOND * SECONDS_PER_MINUTE;

// CSV layout
pub const CSV_DELIMITER: u8 = b',';
pub const CSV_COMMENT_PREFIX: char = '#';
pub const CSV_FIELD_COUNT: usize = 4;
pub const CSV_FIELD_SEPARATOR: &str = ",";

// Percentages print positionally inside [min, max), in E notation outside
pub const PLAIN_DECIMAL_MIN: f64 = 0.001;
pub const PLAIN_DECIMAL_MAX: f64 = 10_000_000.0;

// Time formats
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

// Default values
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILTER: &str = "info,intraday_volume=info";
pub const DEFAULT_LOG_CLEANUP_DAYS: u32 = 30;
