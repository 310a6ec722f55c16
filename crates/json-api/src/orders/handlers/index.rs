//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// With `userId`, lists that user's orders. Without it, lists every order,
/// which requires an admin token.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders, newest first"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Authentication required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = match req.query_uuid("userId")? {
        Some(user) => {
            depot.authorize_user(user.into())?;

            state.app.orders.list_orders_for_user(user.into()).await
        }
        None => {
            if !depot.principal_or_401()?.is_admin() {
                return Err(StatusError::forbidden().brief("Admin role required"));
            }

            state.app.orders.list_orders().await
        }
    }
    .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
