//! Accounts

mod errors;
pub(crate) mod login;
pub(crate) mod password_reset;
pub(crate) mod profile;
pub(crate) mod signup;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::users::records::UserRecord;

pub(crate) use errors::into_status_error;

/// Public view of an account. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    /// `user` or `admin`
    pub role: String,

    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}
