use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor, address::Envelope,
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::Relay;

use super::{compose, render::RenderedAlert};

const SIMULATE_PREVIEW_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid relay port in {0}")]
    BadRelayPort(String),
    #[error("invalid address {address}: {source}")]
    Address {
        address: String,
        source: lettre::address::AddressError,
    },
    #[error("envelope rejected: {0}")]
    Envelope(#[from] lettre::error::Error),
    #[error("smtp transport failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Sends composed messages through the authenticated relay host. The relay
/// expects an implicit-TLS connection; `relay.host` is `host` or
/// `host:port`.
pub struct MailSender {
    relay: Relay,
    email_to: String,
    simulate: bool,
}

impl MailSender {
    pub fn new(relay: Relay, email_to: String, simulate: bool) -> Self {
        Self {
            relay,
            email_to,
            simulate,
        }
    }

    pub fn build_message(&self, rendered: &RenderedAlert, close_related: bool) -> String {
        compose::assemble(rendered, &self.relay.mail, &self.email_to, close_related)
    }

    pub async fn send(&self, message: &str) -> Result<(), MailError> {
        log::info!("send email using relay host");

        if self.simulate {
            log::info!("this is a simulation, e-mail is not sent");
            let preview: String = message.chars().take(SIMULATE_PREVIEW_CHARS).collect();
            println!("Message is:\n{}", preview);
            return Ok(());
        }

        let (host, port) = split_relay_host(&self.relay.host)?;
        log::info!("dial relay {}", self.relay.host);
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?;
        if let Some(port) = port {
            builder = builder.port(port);
        }
        let transport = builder
            .credentials(Credentials::new(
                self.relay.user.clone(),
                self.relay.secret.clone(),
            ))
            .build();

        let from = if self.relay.mail.is_empty() {
            None
        } else {
            Some(parse_address(&self.relay.mail)?)
        };
        let envelope = Envelope::new(from, vec![parse_address(&self.email_to)?])?;

        transport.send_raw(&envelope, message.as_bytes()).await?;
        log::info!("e-mail is on the way, relay session closed");
        Ok(())
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.parse().map_err(|source| MailError::Address {
        address: raw.to_string(),
        source,
    })
}

fn split_relay_host(host: &str) -> Result<(&str, Option<u16>), MailError> {
    match host.rsplit_once(':') {
        Some((name, port)) => {
            let port = port
                .parse()
                .map_err(|_| MailError::BadRelayPort(host.to_string()))?;
            Ok((name, Some(port)))
        }
        None => Ok((host, None)),
    }
}
