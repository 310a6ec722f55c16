//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use mayfield_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        CartsServiceError::Sql(source) => {
            error!("cart pricing query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
