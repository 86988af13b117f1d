//! Run configuration, read once from the environment

use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_URL: &str = "https://elen.nu/dagens-spotpris/se3-stockholm/";
pub const DEFAULT_AREA: &str = "SE3";
pub const DEFAULT_CHART_SELECTOR: &str = "canvas[data-labels][data-datasets]";
pub const DEFAULT_INFLUX_DB: &str = "powerprices";

// Verbosity levels
pub const VERBOSE_QUIET: u8 = 0;
pub const VERBOSE_ERROR: u8 = 1;
pub const VERBOSE_WARNING: u8 = 2;
pub const VERBOSE_INFO: u8 = 3;
pub const VERBOSE_DEBUG: u8 = 4;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Time-series server settings
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub server: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: String,
}

/// Where the points go
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub influx: InfluxConfig,
    /// MariaDB/MySQL DSN, `None` disables the relational sink
    pub relational_dsn: Option<String>,
}

/// How the chart is found and tagged
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub chart_selector: String,
    pub area: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub page_url: String,
    pub verbosity: u8,
    pub extract: ExtractConfig,
    pub sinks: SinkConfig,
}

impl AppConfig {
    /// Read `TIMPRIS_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let verbosity = match get("TIMPRIS_VERBOSE") {
            Some(raw) => match raw.parse::<u8>() {
                Ok(level) if level <= VERBOSE_DEBUG => level,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TIMPRIS_VERBOSE",
                        value: raw,
                    })
                }
            },
            None => VERBOSE_QUIET,
        };

        let area = get("TIMPRIS_AREA").unwrap_or_else(|| DEFAULT_AREA.to_string());
        if area.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                key: "TIMPRIS_AREA",
                value: area,
            });
        }

        let server = get("TIMPRIS_INFLUXSERVER").ok_or(ConfigError::Missing("TIMPRIS_INFLUXSERVER"))?;

        Ok(Self {
            page_url: get("TIMPRIS_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            verbosity,
            extract: ExtractConfig {
                chart_selector: get("TIMPRIS_CHART_SELECTOR")
                    .unwrap_or_else(|| DEFAULT_CHART_SELECTOR.to_string()),
                area,
            },
            sinks: SinkConfig {
                influx: InfluxConfig {
                    server,
                    user: get("TIMPRIS_INFLUXUSER"),
                    password: get("TIMPRIS_INFLUXPASSWD"),
                    database: get("TIMPRIS_INFLUXDB").unwrap_or_else(|| DEFAULT_INFLUX_DB.to_string()),
                },
                relational_dsn: get("TIMPRIS_MARIADSN"),
            },
        })
    }

    /// Default log level for the configured verbosity
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            VERBOSE_QUIET => LevelFilter::OFF,
            VERBOSE_ERROR => LevelFilter::ERROR,
            VERBOSE_WARNING => LevelFilter::WARN,
            VERBOSE_INFO => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}
