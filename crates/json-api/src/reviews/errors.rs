//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use mayfield_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        ReviewsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown user or product")
        }
        ReviewsServiceError::MissingRequiredData | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Missing required fields")
        }
        ReviewsServiceError::Sql(source) => {
            error!("review query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
