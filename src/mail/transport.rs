//! Mail transport.
//!
//! # Responsibilities
//! - Define the delivery seam the contact handler sends through
//! - Provide the production SMTP implementation (lettre)
//!
//! # Design Decisions
//! - The trait takes pre-rendered message bytes; formatting stays in
//!   mime.rs and transports never re-encode
//! - Credentials are only attached over smtps URLs; a misconfigured
//!   plain-text URL fails at the server instead of leaking them

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpConfig;

/// Error type for mail dispatch.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("invalid envelope: {0}")]
    Envelope(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(String),
}

/// Asynchronous best-effort mail delivery.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a raw, pre-formatted message from one address to another.
    async fn send(&self, from: &str, to: &str, raw: &[u8]) -> Result<(), MailError>;
}

/// SMTP delivery via lettre.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a mailer from configuration. Does not connect; the first
    /// send establishes the session.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::from_url(&config.url)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .authentication(vec![Mechanism::Plain]);

        if config.url.starts_with("smtps://") {
            if let (Some(username), Some(password)) = (&config.username, &config.password) {
                builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
            }
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, from: &str, to: &str, raw: &[u8]) -> Result<(), MailError> {
        let envelope = Envelope::new(Some(from.parse()?), vec![to.parse()?])?;

        self.transport
            .send_raw(&envelope, raw)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!(to = %to, bytes = raw.len(), "Mail dispatched");
        Ok(())
    }
}
