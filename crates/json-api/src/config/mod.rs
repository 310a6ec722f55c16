//! Server configuration module

use clap::Parser;
use thiserror::Error;

use mayfield_app::{auth::TokenError, context::AppSettings, mailer::MailerError};

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    email::EmailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    pricing::PricingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod email;
pub(crate) mod observability;
pub(crate) mod pricing;
pub(crate) mod server;

/// Settings that parse but cannot be turned into running services.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid token signing key: {0}")]
    SigningKey(#[source] TokenError),

    #[error("token TTL must be a positive number of seconds")]
    TokenTtl,

    #[error("invalid SMTP settings: {0}")]
    Smtp(#[source] MailerError),
}

/// Mayfield JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "mayfield-json", about = "Mayfield Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Shipping and tax settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Outgoing email settings.
    #[command(flatten)]
    pub email: EmailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Build the settings shared by the application services.
    pub fn app_settings(&self) -> Result<AppSettings, ConfigError> {
        Ok(AppSettings {
            pricing: self.pricing.policy(),
            signing_key: self.auth.signing_key()?,
            token_ttl: self.auth.token_ttl()?,
            mailer: self.email.mailer()?,
        })
    }
}
