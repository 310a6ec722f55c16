//! Wishlist Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    wishlist::{WishlistEntryResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    pub items: Vec<WishlistEntryResponse>,
}

/// Wishlist Index Handler
#[endpoint(
    tags("wishlist"),
    summary = "List Wishlist",
    responses(
        (status_code = StatusCode::OK, description = "Wishlist, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing userId"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = req.require_query_uuid("userId")?;

    depot.authorize_user(user.into())?;

    let items = state
        .app
        .wishlist
        .list_items(user.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(WishlistResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
