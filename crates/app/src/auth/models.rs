//! Auth data models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::users::records::{Role, UserUuid};

/// Claims embedded in a signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User the token was issued to.
    pub sub: Uuid,

    /// Role held by the user when the token was issued.
    pub role: Role,

    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.exp <= now.as_second()
    }
}

/// Authenticated caller derived from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: UserUuid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this caller may read or write data owned by `user`.
    #[must_use]
    pub fn can_act_for(&self, user: UserUuid) -> bool {
        self.is_admin() || self.user_uuid == user
    }
}

impl From<&Claims> for Principal {
    fn from(claims: &Claims) -> Self {
        Self {
            user_uuid: UserUuid::from_uuid(claims.sub),
            role: claims.role,
        }
    }
}

/// Token issuance result.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}
