//! Address Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    addresses::{AddressResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressesResponse {
    pub addresses: Vec<AddressResponse>,
}

/// Address Index Handler
///
/// Lists the addresses of `userId`, default first.
#[endpoint(
    tags("addresses"),
    summary = "List Addresses",
    responses(
        (status_code = StatusCode::OK, description = "Addresses"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing userId"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<AddressesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = req.require_query_uuid("userId")?;

    depot.authorize_user(user.into())?;

    let addresses = state
        .app
        .addresses
        .list_addresses(user.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(AddressesResponse {
        addresses: addresses.into_iter().map(Into::into).collect(),
    }))
}
