use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_file: String,
    pub email_to: String,
    #[serde(default = "default_alarm_hour")]
    pub alarm_hour: u32,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub debug: bool,
    pub relay: Relay,
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub web_check: WebCheckConfig,
    #[serde(default)]
    pub simulation: Simulation,
}

/// Subset of the configuration that may be swapped at runtime by the
/// hot-reload job. Everything else requires a restart.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub alarm_hour: u32,
    pub web_check: WebCheckConfig,
}

impl RuntimeConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            alarm_hour: config.alarm_hour,
            web_check: config.web_check.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relay {
    pub host: String,
    pub user: String,
    pub secret: String,
    #[serde(default)]
    pub mail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebCheckConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_web_selector")]
    pub selector: String,
    #[serde(default = "default_web_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_web_check_interval_secs")]
    pub interval_secs: u64,
}

impl Default for WebCheckConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            selector: default_web_selector(),
            placeholder: default_web_placeholder(),
            interval_secs: default_web_check_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Simulation {
    #[serde(default)]
    pub enabled: bool,
}
