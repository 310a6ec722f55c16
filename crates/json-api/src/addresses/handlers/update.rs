//! Update Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use mayfield_app::domain::addresses::data::AddressUpdate;

use crate::{
    addresses::{AddressPayload, AddressResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateAddressRequest {
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,

    #[serde(flatten)]
    pub address: AddressPayload,
}

/// Update Address Handler
///
/// The address must belong to `userId`.
#[endpoint(
    tags("addresses"),
    summary = "Update Address",
    responses(
        (status_code = StatusCode::OK, description = "Address updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing required fields"),
        (status_code = StatusCode::NOT_FOUND, description = "Address not found"),
    ),
)]
#[tracing::instrument(
    name = "addresses.update",
    skip(json, depot),
    fields(address_uuid = tracing::field::Empty, is_default = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateAddressRequest>,
    depot: &mut Depot,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let (Some(address), Some(user)) = (request.id, request.user_id) else {
        return Err(StatusError::bad_request().brief("Missing required fields"));
    };

    depot.authorize_user(user.into())?;

    let (fields, is_default) = request.address.into_parts();

    let span = tracing::Span::current();

    span.record("address_uuid", tracing::field::display(address));
    span.record("is_default", is_default);

    let updated = state
        .app
        .addresses
        .update_address(address.into(), user.into(), AddressUpdate { fields, is_default })
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
