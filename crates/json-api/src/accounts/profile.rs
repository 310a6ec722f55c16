//! Profile Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use tracing::info;

use mayfield_app::domain::users::data::ProfileUpdate;

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ProfileRequest {
    pub name: String,
    pub email: String,
}

/// Get Profile Handler
///
/// Returns the account the bearer token belongs to.
#[endpoint(
    tags("accounts"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
    ),
)]
pub(crate) async fn get_handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .get_user(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

/// Update Profile Handler
#[endpoint(
    tags("accounts"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid name or email"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
#[tracing::instrument(
    name = "accounts.update_profile",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn update_handler(
    json: JsonBody<ProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user_uuid));

    let user = state
        .app
        .users
        .update_profile(
            principal.user_uuid,
            ProfileUpdate {
                name: request.name,
                email: request.email,
            },
        )
        .await
        .map_err(into_status_error)?;

    info!("updated profile");

    Ok(Json(user.into()))
}
