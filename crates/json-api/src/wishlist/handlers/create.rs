//! Add Wishlist Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    wishlist::{WishlistItemResponse, errors::into_status_error},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WishlistRequest {
    pub user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

/// Add Wishlist Item Handler
///
/// Adding a product that is already wishlisted returns the existing item.
#[endpoint(
    tags("wishlist"),
    summary = "Add To Wishlist",
    responses(
        (status_code = StatusCode::OK, description = "Wishlist item"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing userId or productId"),
        (status_code = StatusCode::NOT_FOUND, description = "User or product not found"),
    ),
)]
#[tracing::instrument(
    name = "wishlist.add",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<WishlistRequest>,
    depot: &mut Depot,
) -> Result<Json<WishlistItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let (Some(user), Some(product)) = (request.user_id, request.product_id) else {
        return Err(StatusError::bad_request().brief("Missing required fields"));
    };

    depot.authorize_user(user.into())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    let item = state
        .app
        .wishlist
        .add_item(user.into(), product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
