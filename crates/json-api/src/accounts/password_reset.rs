//! Password Reset Handlers
//!
//! A reset request always answers 202 so that callers cannot probe which
//! emails are registered. The token arrives by email and is exchanged for a
//! new password at the confirm endpoint.

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResetConfirmation {
    pub token: String,
    pub new_password: String,
}

/// Request Password Reset Handler
#[endpoint(
    tags("accounts"),
    summary = "Request Password Reset",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Reset email queued if the account exists"),
    ),
)]
pub(crate) async fn request_handler(
    json: JsonBody<ResetRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .users
        .request_password_reset(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::ACCEPTED)
}

/// Confirm Password Reset Handler
#[endpoint(
    tags("accounts"),
    summary = "Confirm Password Reset",
    responses(
        (status_code = StatusCode::OK, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Token invalid or expired, or password too short"),
    ),
)]
#[tracing::instrument(name = "accounts.reset_password", skip(json, depot), err)]
pub(crate) async fn confirm_handler(
    json: JsonBody<ResetConfirmation>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let confirmation = json.into_inner();

    let user = state
        .app
        .users
        .reset_password(&confirmation.token, &confirmation.new_password)
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user.uuid, "password reset confirmed");

    Ok(Json(user.into()))
}
