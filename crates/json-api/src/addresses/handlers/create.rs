//! Create Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use mayfield_app::domain::addresses::{data::NewAddress, records::AddressUuid};

use crate::{
    addresses::{AddressPayload, AddressResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAddressRequest {
    pub user_id: Option<Uuid>,

    #[serde(flatten)]
    pub address: AddressPayload,
}

/// Create Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Create Address",
    responses(
        (status_code = StatusCode::CREATED, description = "Address saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing required fields"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "addresses.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, is_default = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAddressRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AddressResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let Some(user) = request.user_id else {
        return Err(StatusError::bad_request().brief("Missing required fields"));
    };

    depot.authorize_user(user.into())?;

    let (fields, is_default) = request.address.into_parts();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("is_default", is_default);

    let address = state
        .app
        .addresses
        .create_address(NewAddress {
            uuid: AddressUuid::new(),
            user_uuid: user.into(),
            fields,
            is_default,
        })
        .await
        .map_err(into_status_error)?;

    info!(address_uuid = %address.uuid, is_default = address.is_default, "saved address");

    res.status_code(StatusCode::CREATED);

    Ok(Json(address.into()))
}
