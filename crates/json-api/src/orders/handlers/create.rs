//! Create Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use mayfield_app::domain::{
    orders::{data::NewOrder, records::OrderUuid},
    pricing::OrderTotals,
};

use crate::{
    cart::CartItemRequest,
    extensions::*,
    orders::{OrderResponse, ShippingPayload, errors::into_status_error},
    state::State,
};

/// Checkout submission. Totals are those shown to the customer and must
/// agree with the server's pricing.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub user_id: Option<Uuid>,

    #[serde(default)]
    pub items: Vec<CartItemRequest>,

    pub shipping: Option<ShippingPayload>,

    #[serde(default)]
    pub subtotal: u64,

    #[serde(default)]
    pub shipping_cost: u64,

    #[serde(default)]
    pub tax: u64,

    #[serde(default)]
    pub total: u64,

    pub idempotency_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlacedOrderResponse {
    pub order: OrderResponse,
}

/// Create Order Handler
///
/// Answers 201 for a new order and 200 when an idempotency key replays an
/// earlier one.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::OK, description = "Earlier order with the same idempotency key"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or totals do not match"),
        (status_code = StatusCode::FORBIDDEN, description = "Token does not belong to this user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        replayed = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PlacedOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let (Some(user), Some(shipping)) = (request.user_id, request.shipping) else {
        return Err(StatusError::bad_request().brief("Missing required fields"));
    };

    if request.items.is_empty() {
        return Err(StatusError::bad_request().brief("Missing required fields"));
    }

    depot.authorize_user(user.into())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let placed = state
        .app
        .orders
        .create_order(NewOrder {
            uuid: OrderUuid::new(),
            user_uuid: user.into(),
            lines: request.items.into_iter().map(Into::into).collect(),
            shipping: shipping.into(),
            totals: OrderTotals {
                subtotal: request.subtotal,
                shipping: request.shipping_cost,
                tax: request.tax,
                total: request.total,
            },
            idempotency_key: request.idempotency_key,
        })
        .await
        .map_err(into_status_error)?;

    span.record(
        "order_uuid",
        tracing::field::display(placed.detail.order.uuid),
    );
    span.record("replayed", !placed.created);

    if placed.created {
        info!(order_number = %placed.detail.order.order_number, "order placed");

        res.status_code(StatusCode::CREATED);
    } else {
        info!(order_number = %placed.detail.order.order_number, "replayed order");

        res.status_code(StatusCode::OK);
    }

    Ok(Json(PlacedOrderResponse {
        order: placed.detail.into(),
    }))
}
