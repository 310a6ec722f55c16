//! Order Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod track;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::orders::records::{OrderDetail, OrderItemRecord, ShippingDetails};

/// Shipping contact and address, as submitted at checkout and echoed back.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ShippingPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<ShippingPayload> for ShippingDetails {
    fn from(shipping: ShippingPayload) -> Self {
        ShippingDetails {
            full_name: shipping.full_name,
            email: shipping.email,
            phone: shipping.phone,
            address: shipping.address,
            city: shipping.city,
            state: shipping.state,
            zip_code: shipping.zip_code,
            country: shipping.country,
        }
    }
}

impl From<ShippingDetails> for ShippingPayload {
    fn from(shipping: ShippingDetails) -> Self {
        ShippingPayload {
            full_name: shipping.full_name,
            email: shipping.email,
            phone: shipping.phone,
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
pub(crate) struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,

    /// Unit price at the time of ordering
    pub price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            id: item.uuid.into(),
            product_id: item.product_uuid.into(),
            product_name: item.product_name,
            product_image: item.product_image,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub shipping: ShippingPayload,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderDetail> for OrderResponse {
    fn from(detail: OrderDetail) -> Self {
        let OrderDetail { order, items } = detail;

        OrderResponse {
            id: order.uuid.into(),
            order_number: order.order_number,
            user_id: order.user_uuid.into(),
            status: order.status.to_string(),
            items: items.into_iter().map(Into::into).collect(),
            shipping: order.shipping.into(),
            subtotal: order.totals.subtotal,
            shipping_cost: order.totals.shipping,
            tax: order.totals.tax,
            total: order.totals.total,
            idempotency_key: order.idempotency_key,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
