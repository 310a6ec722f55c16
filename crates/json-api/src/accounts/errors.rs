//! Account Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use mayfield_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidCredentials => {
            debug!("login rejected");

            StatusError::unauthorized().brief("Invalid email or password")
        }
        UsersServiceError::InvalidResetToken => {
            StatusError::bad_request().brief("Reset token is invalid or has expired")
        }
        UsersServiceError::Validation(message) => StatusError::bad_request().brief(message),
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::PasswordHash => {
            error!("password hashing failed");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
