//! Auth service.

use jiff::{SignedDuration, Timestamp};
use mockall::automock;

use crate::{
    auth::{
        AuthServiceError, Claims, IssuedToken, Principal, SigningKey, TokenVersion,
        format_token, parse_token,
    },
    domain::users::records::{Role, UserUuid},
};

/// Default lifetime of an issued session token.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24 * 7);

#[derive(Debug, Clone)]
pub struct HmacAuthService {
    key: SigningKey,
    ttl: SignedDuration,
}

impl HmacAuthService {
    #[must_use]
    pub fn new(key: SigningKey, ttl: SignedDuration) -> Self {
        Self { key, ttl }
    }
}

impl AuthService for HmacAuthService {
    fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_token(bearer_token, &self.key)?;

        if parsed.claims.is_expired(Timestamp::now()) {
            return Err(AuthServiceError::Expired);
        }

        Ok(Principal::from(&parsed.claims))
    }

    fn issue_token(&self, user: UserUuid, role: Role) -> Result<IssuedToken, AuthServiceError> {
        let expires_at = Timestamp::now()
            .checked_add(self.ttl)
            .map_err(AuthServiceError::ExpiryOutOfRange)?;

        let claims = Claims {
            sub: user.into_uuid(),
            role,
            exp: expires_at.as_second(),
        };

        let token = format_token(&claims, TokenVersion::V1, &self.key)?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[automock]
pub trait AuthService: Send + Sync {
    /// Verify a bearer token and return the caller it identifies.
    fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;

    /// Issue a signed token for the given user and role.
    fn issue_token(&self, user: UserUuid, role: Role) -> Result<IssuedToken, AuthServiceError>;
}
