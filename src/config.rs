//! Configuration management for FileHub Server

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub notify: NotifyConfig,
    pub interest: InterestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Push delivery settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Per-request timeout when calling a subscriber endpoint
    pub timeout_secs: u64,
    /// Upper bound on deliveries running at the same time
    pub max_in_flight: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterestConfig {
    /// Interval of the expired-interest sweep; 0 leaves expired interests
    /// in place until they are checked, replaced or cancelled.
    pub sweep_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            notify: NotifyConfig {
                timeout_secs: 5,
                max_in_flight: 64,
            },
            interest: InterestConfig {
                sweep_interval_secs: 0,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
            },
            notify: NotifyConfig {
                timeout_secs: parse_var("NOTIFY_TIMEOUT_SECS", defaults.notify.timeout_secs)?,
                max_in_flight: parse_var("NOTIFY_MAX_IN_FLIGHT", defaults.notify.max_in_flight)?,
            },
            interest: InterestConfig {
                sweep_interval_secs: parse_var(
                    "INTEREST_SWEEP_SECS",
                    defaults.interest.sweep_interval_secs,
                )?,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl NotifyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl InterestConfig {
    /// Sweep period, or `None` when the sweep is disabled
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
