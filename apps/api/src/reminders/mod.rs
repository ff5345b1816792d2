//! Reminder e-mails: composes the care reminder and hands it to a `Mailer`.
//!
//! The transport itself is an external collaborator. `AppState` carries an
//! `Arc<dyn Mailer>`; the default `TracingMailer` only logs what it would send.

pub mod compose;
pub mod handlers;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

pub use compose::compose_reminder;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// A fully composed outbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// Self-contained HTML with inline styles.
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Logs outbound mail instead of delivering it.
pub struct TracingMailer;

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if !mail.to.contains('@') {
            return Err(MailError::InvalidRecipient(mail.to.clone()));
        }
        info!(
            from = %mail.from,
            to = %mail.to,
            subject = %mail.subject,
            html_bytes = mail.html.len(),
            "Reminder e-mail queued"
        );
        Ok(())
    }
}
