//! Auth Config

use clap::Args;
use jiff::SignedDuration;

use mayfield_app::auth::{DEFAULT_TOKEN_TTL, SigningKey};

use super::ConfigError;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Key used to sign and verify session tokens (at least 32 bytes)
    #[arg(long, env = "TOKEN_SIGNING_KEY", hide_env_values = true)]
    pub token_signing_key: String,

    /// Session token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = DEFAULT_TOKEN_TTL.as_secs())]
    pub token_ttl_seconds: i64,
}

impl AuthConfig {
    pub(crate) fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        SigningKey::from_bytes(self.token_signing_key.as_bytes())
            .map_err(ConfigError::SigningKey)
    }

    pub(crate) fn token_ttl(&self) -> Result<SignedDuration, ConfigError> {
        if self.token_ttl_seconds <= 0 {
            return Err(ConfigError::TokenTtl);
        }

        Ok(SignedDuration::from_secs(self.token_ttl_seconds))
    }
}
