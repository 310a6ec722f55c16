//! Admin User Handlers

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use mayfield_app::domain::users::records::Role;

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RoleRequest {
    /// `user` or `admin`
    pub role: String,
}

/// List Users Handler
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "All accounts"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn index_handler(depot: &mut Depot) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// Set Role Handler
///
/// Takes effect on the user's next login; tokens already issued keep their
/// role until they expire.
#[endpoint(
    tags("admin"),
    summary = "Set User Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Role changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.set_role",
    skip(user, json, depot),
    fields(user_uuid = tracing::field::Empty, role = tracing::field::Empty),
    err
)]
pub(crate) async fn role_handler(
    user: PathParam<Uuid>,
    json: JsonBody<RoleRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner();

    let role = json
        .into_inner()
        .role
        .parse::<Role>()
        .or_400("Role must be \"user\" or \"admin\"")?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("role", role.as_str());

    let updated = state
        .app
        .users
        .set_role(user.into(), role)
        .await
        .map_err(into_status_error)?;

    info!("changed user role");

    Ok(Json(updated.into()))
}
