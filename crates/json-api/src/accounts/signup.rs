//! Signup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use tracing::info;

use mayfield_app::domain::users::{
    data::NewUser,
    records::{Role, UserUuid},
};

use crate::{
    accounts::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signup Handler
///
/// Registers a customer account. Admins are created from the CLI.
#[endpoint(
    tags("accounts"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid name, email or password"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
#[tracing::instrument(name = "accounts.signup", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let user = state
        .app
        .users
        .create_user(
            NewUser {
                uuid: UserUuid::new(),
                name: request.name,
                email: request.email,
                password: request.password,
            },
            Role::User,
        )
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
