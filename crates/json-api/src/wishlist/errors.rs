//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use mayfield_app::domain::wishlist::WishlistServiceError;

pub(crate) fn into_status_error(error: WishlistServiceError) -> StatusError {
    match error {
        WishlistServiceError::NotFound | WishlistServiceError::InvalidReference => {
            StatusError::not_found().brief("User or product not found")
        }
        WishlistServiceError::Sql(source) => {
            error!("wishlist query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
