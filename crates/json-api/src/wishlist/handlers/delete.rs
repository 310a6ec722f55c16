//! Remove Wishlist Item Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, wishlist::errors::into_status_error};

/// Remove Wishlist Item Handler
///
/// Takes `userId` and `productId` from the query string. Removing a product
/// that is not wishlisted succeeds.
#[endpoint(
    tags("wishlist"),
    summary = "Remove From Wishlist",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing userId or productId"),
    ),
)]
#[tracing::instrument(name = "wishlist.remove", skip(req, depot), err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = req.require_query_uuid("userId")?;
    let product = req.require_query_uuid("productId")?;

    depot.authorize_user(user.into())?;

    state
        .app
        .wishlist
        .remove_item(user.into(), product.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
