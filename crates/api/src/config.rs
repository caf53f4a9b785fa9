//! Application configuration loaded from environment variables.

use std::str::FromStr;

use domain::PolicyConfig;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `DATABASE_URL`: Postgres connection string; in-memory storage when unset
/// - `RESERVATION_MAX_ADVANCE_DAYS_REGULAR` (default: `60`)
/// - `RESERVATION_MAX_ADVANCE_DAYS_VIP` (default: `90`)
/// - `RESERVATION_MIN_STAY_NIGHTS` (default: `1`)
/// - `SEED_DEMO_GUESTS`: register demo guest profiles at startup (default: `true`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub policy: PolicyConfig,
    pub seed_demo_guests: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_format),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            policy: PolicyConfig {
                max_advance_days_regular: parse_var(
                    &lookup,
                    "RESERVATION_MAX_ADVANCE_DAYS_REGULAR",
                )
                .unwrap_or(defaults.policy.max_advance_days_regular),
                max_advance_days_vip: parse_var(&lookup, "RESERVATION_MAX_ADVANCE_DAYS_VIP")
                    .unwrap_or(defaults.policy.max_advance_days_vip),
                min_stay_nights: parse_var(&lookup, "RESERVATION_MIN_STAY_NIGHTS")
                    .unwrap_or(defaults.policy.min_stay_nights),
            },
            seed_demo_guests: parse_var(&lookup, "SEED_DEMO_GUESTS")
                .unwrap_or(defaults.seed_demo_guests),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            database_url: None,
            policy: PolicyConfig::default(),
            seed_demo_guests: true,
        }
    }
}
