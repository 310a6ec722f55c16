//! Auth service errors.

use thiserror::Error;

use crate::auth::TokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token is invalid")]
    Invalid(#[from] TokenError),

    #[error("token has expired")]
    Expired,

    #[error("token expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),
}
