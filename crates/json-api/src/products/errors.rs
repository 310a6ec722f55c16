//! Product Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use mayfield_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => {
            debug!("product not found");

            StatusError::not_found().brief("Product not found")
        }
        ProductsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::OutOfRange(_) => {
            StatusError::bad_request().brief("Price or stock is out of range")
        }
        ProductsServiceError::Sql(source) => {
            error!("product query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
