use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data_file must not be empty".to_string(),
            ));
        }
        if self.email_to.trim().is_empty() {
            return Err(ConfigError::Validation(
                "email_to must not be empty".to_string(),
            ));
        }
        if self.alarm_hour > 23 {
            return Err(ConfigError::Validation(
                "alarm_hour must be between 0 and 23".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.relay.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "relay.host must not be empty".to_string(),
            ));
        }
        if self.relay.user.trim().is_empty() {
            return Err(ConfigError::Validation(
                "relay.user must not be empty".to_string(),
            ));
        }
        if self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "telegram.bot_token must not be empty".to_string(),
            ));
        }
        if self.telegram.chat_id == 0 {
            return Err(ConfigError::Validation(
                "telegram.chat_id must not be zero".to_string(),
            ));
        }
        if self.web_check.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "web_check.interval_secs must be greater than 0".to_string(),
            ));
        }
        if !self.web_check.url.trim().is_empty() && self.web_check.selector.trim().is_empty() {
            return Err(ConfigError::Validation(
                "web_check.selector must not be empty when web_check.url is set".to_string(),
            ));
        }
        Ok(())
    }
}
