//! Email Config

use std::sync::Arc;

use clap::Args;
use secrecy::SecretString;
use tracing::info;

use mayfield_app::mailer::{LogMailer, Mailer, SmtpMailer, SmtpSettings};

use super::ConfigError;

/// Outgoing email settings. Without `SMTP_HOST`, messages are only logged.
#[derive(Debug, Args)]
pub struct EmailConfig {
    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME", default_value = "")]
    pub smtp_username: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true, default_value = "")]
    pub smtp_password: String,

    /// Sender address for outgoing email
    #[arg(long, env = "EMAIL_FROM", default_value = "Mayfield Farm <orders@mayfield.example>")]
    pub email_from: String,
}

impl EmailConfig {
    pub(crate) fn mailer(&self) -> Result<Arc<dyn Mailer>, ConfigError> {
        let Some(host) = self.smtp_host.as_ref() else {
            info!("SMTP_HOST not set, outgoing email will be logged only");

            return Ok(Arc::new(LogMailer));
        };

        let mailer = SmtpMailer::new(&SmtpSettings {
            host: host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: SecretString::from(self.smtp_password.clone()),
            from: self.email_from.clone(),
        })
        .map_err(ConfigError::Smtp)?;

        Ok(Arc::new(mailer))
    }
}
