//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    pub expires_at: String,
    pub user: UserResponse,
}

/// Login Handler
#[endpoint(
    tags("accounts"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
    ),
)]
#[tracing::instrument(name = "accounts.login", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let user = state
        .app
        .users
        .authenticate(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    let issued = state
        .app
        .auth
        .issue_token(user.uuid, user.role)
        .or_500("failed to issue token")?;

    info!(user_uuid = %user.uuid, role = %user.role, "user signed in");

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at.to_string(),
        user: user.into(),
    }))
}
