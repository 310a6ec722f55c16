//! Address Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use mayfield_app::domain::addresses::AddressesServiceError;

pub(crate) fn into_status_error(error: AddressesServiceError) -> StatusError {
    match error {
        AddressesServiceError::NotFound => StatusError::not_found().brief("Address not found"),
        AddressesServiceError::UnknownUser | AddressesServiceError::InvalidReference => {
            StatusError::not_found().brief("User not found")
        }
        AddressesServiceError::Validation(message) => StatusError::bad_request().brief(message),
        AddressesServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required fields")
        }
        AddressesServiceError::DefaultConflict => {
            warn!("concurrent default address write");

            StatusError::conflict().brief("Default address changed concurrently, please retry")
        }
        AddressesServiceError::Sql(source) => {
            error!("address query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
