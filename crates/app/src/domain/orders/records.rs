//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        orders::status::OrderStatus, pricing::OrderTotals, products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Shipping contact and address copied onto an order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingDetails {
    pub fn is_complete(&self) -> bool {
        [
            &self.full_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub idempotency_key: Option<String>,
    pub status: OrderStatus,
    pub shipping: ShippingDetails,
    pub totals: OrderTotals,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record, joined with the product it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: String,
    pub quantity: u32,
    /// Unit price at the time of ordering.
    pub price: u64,
}

/// An order together with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

/// Result of placing an order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub detail: OrderDetail,
    /// `false` when an earlier order with the same idempotency key was returned.
    pub created: bool,
}
