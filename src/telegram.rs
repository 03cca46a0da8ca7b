use teloxide::prelude::*;
use teloxide::types::ChatId;
use thiserror::Error;

use crate::config::TelegramConfig;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram api request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}

/// Pushes the plain-text rendition of an alert to the configured chat.
pub struct TelegramSender {
    bot: Bot,
    chat_id: ChatId,
    simulate: bool,
    debug: bool,
}

impl TelegramSender {
    pub fn new(config: &TelegramConfig, simulate: bool, debug: bool) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
            chat_id: ChatId(config.chat_id),
            simulate,
            debug,
        }
    }

    pub async fn send(&self, text: &str) -> Result<(), TelegramError> {
        if self.debug {
            log::info!("telegram payload chat_id={}: {}", self.chat_id.0, text);
        }
        if self.simulate {
            log::info!("this is a simulation, telegram message is not sent");
            return Ok(());
        }
        self.bot.send_message(self.chat_id, text).await?;
        log::info!("telegram alert delivered chat_id={}", self.chat_id.0);
        Ok(())
    }
}
