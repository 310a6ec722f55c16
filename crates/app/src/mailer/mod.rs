//! Transactional email.
//!
//! Messages are delivered through a [`Mailer`]. Order confirmations and
//! password reset notices are sent with [`dispatch`], which runs delivery on
//! a detached task so that a failing transport never affects the request that
//! triggered it.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod log;
pub mod messages;
mod smtp;

pub use log::LogMailer;
pub use smtp::{SmtpMailer, SmtpSettings};

/// An outgoing plain text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP transport error")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, email: Email) -> Result<(), MailerError>;
}

/// Send an email in the background, logging delivery failures.
pub fn dispatch(mailer: Arc<dyn Mailer>, email: Email) {
    tokio::spawn(async move {
        let to = email.to.clone();
        let subject = email.subject.clone();

        if let Err(error) = mailer.send(email).await {
            tracing::warn!(%to, %subject, error = %error, "failed to deliver email");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn dispatch_delivers_message_in_background() {
        let (sender, receiver) = oneshot::channel();
        let sender = std::sync::Mutex::new(Some(sender));

        let mut mailer = MockMailer::new();

        mailer.expect_send().once().returning(move |email| {
            if let Some(sender) = sender.lock().ok().and_then(|mut guard| guard.take()) {
                sender.send(email).ok();
            }

            Ok(())
        });

        dispatch(
            Arc::new(mailer),
            Email {
                to: "jo@example.com".to_string(),
                subject: "Hello".to_string(),
                body: "Body".to_string(),
            },
        );

        let delivered = tokio::time::timeout(Duration::from_secs(1), receiver)
            .await
            .expect("dispatch should complete")
            .expect("mailer should receive the email");

        assert_eq!(delivered.subject, "Hello");
    }

    #[tokio::test]
    async fn dispatch_swallows_delivery_errors() {
        let (sender, receiver) = oneshot::channel::<()>();
        let sender = std::sync::Mutex::new(Some(sender));

        let mut mailer = MockMailer::new();

        mailer.expect_send().once().returning(move |email| {
            if let Some(sender) = sender.lock().ok().and_then(|mut guard| guard.take()) {
                sender.send(()).ok();
            }

            Err(MailerError::InvalidAddress(email.to))
        });

        dispatch(
            Arc::new(mailer),
            Email {
                to: "not-an-address".to_string(),
                subject: "Hello".to_string(),
                body: "Body".to_string(),
            },
        );

        tokio::time::timeout(Duration::from_secs(1), receiver)
            .await
            .expect("dispatch should complete")
            .expect("mailer should have been called");
    }
}
