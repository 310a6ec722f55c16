//! Track Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use mayfield_app::domain::orders::records::{OrderDetail, ShippingDetails};

use crate::{
    extensions::*,
    orders::{OrderItemResponse, errors::into_status_error},
    state::State,
};

/// Where the order is going. Contact details are left out of the public view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackedShipping {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<ShippingDetails> for TrackedShipping {
    fn from(shipping: ShippingDetails) -> Self {
        TrackedShipping {
            full_name: shipping.full_name,
            address: shipping.address,
            city: shipping.city,
            state: shipping.state,
            zip_code: shipping.zip_code,
            country: shipping.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackedOrderResponse {
    pub order_number: String,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub shipping: TrackedShipping,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderDetail> for TrackedOrderResponse {
    fn from(detail: OrderDetail) -> Self {
        let OrderDetail { order, items } = detail;

        TrackedOrderResponse {
            order_number: order.order_number,
            status: order.status.to_string(),
            items: items.into_iter().map(Into::into).collect(),
            shipping: order.shipping.into(),
            subtotal: order.totals.subtotal,
            shipping_cost: order.totals.shipping,
            tax: order.totals.tax,
            total: order.totals.total,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Track Order Handler
///
/// Public lookup by order number. Numbers are matched case-insensitively.
#[endpoint(
    tags("orders"),
    summary = "Track Order",
    responses(
        (status_code = StatusCode::OK, description = "Order status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<TrackedOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .orders
        .track_order(&order_number.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use mayfield_app::domain::{
        orders::{
            MockOrdersService, OrdersServiceError, records::OrderUuid, status::OrderStatus,
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
        .service(Router::with_path("orders/track/{order_number}").get(handler))
    }

    #[tokio::test]
    async fn test_track_order_hides_customer_identity() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_track_order()
            .once()
            .withf(|number| number == "mfabcdefghjklm")
            .return_once(|_| {
                Ok(make_order(
                    OrderUuid::new(),
                    UserUuid::new(),
                    OrderStatus::Shipped,
                ))
            });

        let mut res = TestClient::get("http://example.com/orders/track/mfabcdefghjklm")
            .send(&make_service(orders))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["orderNumber"], "MFABCDEFGHJKLM");
        assert_eq!(body["status"], "shipped");
        assert_eq!(body["shipping"]["city"], "Canterbury");
        assert!(body.get("userId").is_none());
        assert!(body["shipping"].get("email").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_number_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_track_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/orders/track/MF000000000")
            .send(&make_service(orders))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(body.get("order").is_none());
        assert_eq!(body["error"]["brief"], "Order not found");

        Ok(())
    }
}
