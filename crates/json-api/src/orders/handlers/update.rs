//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use mayfield_app::domain::orders::status::OrderStatus;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct StatusRequest {
    /// One of `processing`, `packed`, `shipped`, `delivered`, `cancelled`
    pub status: String,
}

/// Update Order Status Handler
///
/// Orders only move forward, may be cancelled until delivered, and setting
/// the current status succeeds without change.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or illegal transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<StatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = order.into_inner();

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Invalid order status")?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let detail = state
        .app
        .orders
        .update_status(order.into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use mayfield_app::domain::{
        orders::{
            MockOrdersService, OrdersServiceError, records::OrderUuid, status::InvalidTransition,
        },
        users::records::UserUuid,
    };

    use crate::test_helpers::{TestApp, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestApp {
            orders: Some(orders),
            ..TestApp::default()
        }
        .service(Router::with_path("orders/{order}").put(handler))
    }

    #[tokio::test]
    async fn test_update_status_success() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |o, status| *o == uuid && *status == OrderStatus::Packed)
            .return_once(move |_, status| Ok(make_order(uuid, UserUuid::new(), status)));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}"))
            .json(&json!({ "status": "packed" }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "packed");
        assert_eq!(body.items.first().map(|i| i.product_name.as_str()), Some("Heritage Carrots"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "shipped" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_backward_transition_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidTransition(InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Processing,
            }))
        });

        let mut res = TestClient::put(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "processing" }))
            .send(&make_service(orders))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body["error"]["brief"],
            "cannot change order status from shipped to processing"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let res = TestClient::put(format!("http://example.com/orders/{}", OrderUuid::new()))
            .json(&json!({ "status": "lost" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
