use thiserror::Error;

use crate::config::Config;
use crate::mail::{MailError, MailSender, RenderError, RenderedAlert, render_due, render_web_changed};
use crate::sched::{DueItem, EventType};
use crate::telegram::{TelegramError, TelegramSender};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("mail channel failed: {0}")]
    Mail(#[from] MailError),
    #[error("telegram channel failed: {0}")]
    Telegram(#[from] TelegramError),
}

/// Fans one composed alert out to both channels. A failed channel never
/// prevents the attempt on the other one, but either failure is reported to
/// the caller so the due bucket stays populated for a retry.
pub struct Dispatcher {
    mail: MailSender,
    telegram: TelegramSender,
}

impl Dispatcher {
    pub fn new(config: &Config, simulate: bool) -> Self {
        Self {
            mail: MailSender::new(config.relay.clone(), config.email_to.clone(), simulate),
            telegram: TelegramSender::new(&config.telegram, simulate, config.debug),
        }
    }

    pub async fn dispatch_due(
        &self,
        kind: EventType,
        items: &[DueItem],
    ) -> Result<(), DispatchError> {
        let rendered = render_due(kind, items)?;
        self.deliver(&rendered, !items.is_empty()).await
    }

    pub async fn dispatch_web_changed(&self, url: &str) -> Result<(), DispatchError> {
        let rendered = render_web_changed(url)?;
        self.deliver(&rendered, false).await
    }

    async fn deliver(
        &self,
        rendered: &RenderedAlert,
        close_related: bool,
    ) -> Result<(), DispatchError> {
        let message = self.mail.build_message(rendered, close_related);

        let mail_result = self.mail.send(&message).await;
        if let Err(error) = &mail_result {
            log::error!("mail channel failed: {}", error);
        }
        let telegram_result = self.telegram.send(&rendered.plain).await;
        if let Err(error) = &telegram_result {
            log::error!("telegram channel failed: {}", error);
        }

        mail_result?;
        telegram_result?;
        Ok(())
    }
}
