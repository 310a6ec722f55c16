//! Logging mailer, used when no SMTP relay is configured.

use async_trait::async_trait;

use crate::mailer::{Email, Mailer, MailerError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailerError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "email not sent: no SMTP relay configured"
        );

        Ok(())
    }
}
