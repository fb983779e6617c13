use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_interval_sec() -> u64 {
    30
}

fn default_task_timeout_seconds() -> u64 {
    60
}

#[derive(Deserialize, Debug)]
pub struct CollectorConfig {
    #[serde(default = "default_interval_sec")]
    pub interval_sec: u64,
    // upper bound for one poll including the InfluxDB write
    #[serde(default = "default_task_timeout_seconds")]
    pub task_timeout_seconds: u64,
}

pub fn load_collector_config() -> Result<CollectorConfig> {
    match envy::prefixed("COLLECTOR_").from_env::<CollectorConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load CollectorConfig: {}", err)),
    }
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_recovery_timeout_seconds() -> u64 {
    300
}

#[derive(Deserialize, Debug)]
pub struct CircuitBreakerConfig {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_recovery_timeout_seconds")]
    pub recovery_timeout_seconds: u64,
}

pub fn load_circuit_breaker_config() -> Result<CircuitBreakerConfig> {
    match envy::prefixed("CIRCUIT_BREAKER_").from_env::<CircuitBreakerConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load CircuitBreakerConfig: {}", err)),
    }
}

fn default_modem_url() -> String {
    "https://192.168.100.1/HNAP1/".to_string()
}

fn default_modem_user() -> String {
    "admin".to_string()
}

fn default_modem_timeout_seconds() -> u64 {
    45
}

fn default_device_info() -> bool {
    true
}

#[derive(Deserialize)]
pub struct ModemConfig {
    #[serde(default = "default_modem_url")]
    pub url: String,
    #[serde(default = "default_modem_user")]
    pub user: String,
    pub password: String,
    #[serde(default = "default_modem_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub insecure_skip_verify: bool,
    #[serde(default = "default_device_info")]
    pub device_info: bool,
}

impl ModemConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| ConfigError::invalid("MODEM_URL", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "MODEM_URL",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.user.is_empty() {
            return Err(ConfigError::missing("MODEM_USER"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::missing("MODEM_PASSWORD"));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "MODEM_TIMEOUT_SECONDS",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ModemConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModemConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("device_info", &self.device_info)
            .finish()
    }
}

pub(crate) fn load_modem_config() -> Result<ModemConfig> {
    let config = match envy::prefixed("MODEM_").from_env::<ModemConfig>() {
        Ok(config) => config,
        Err(err) => return Err(anyhow!("Failed to load ModemConfig: {}", err)),
    };
    config
        .validate()
        .map_err(|err| anyhow!("Failed to load ModemConfig: {}", err))?;
    Ok(config)
}

#[derive(Deserialize, Debug)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

pub fn load_influx_config() -> Result<InfluxConfig> {
    match envy::prefixed("INFLUXDB_").from_env::<InfluxConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load InfluxConfig: {}", err)),
    }
}
