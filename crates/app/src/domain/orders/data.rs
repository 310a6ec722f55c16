//! Order Data

use crate::domain::{
    carts::data::CartLine,
    orders::records::{OrderUuid, ShippingDetails},
    pricing::OrderTotals,
    users::records::UserUuid,
};

pub const MAX_IDEMPOTENCY_KEY_LENGTH: usize = 255;

/// Checkout submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub lines: Vec<CartLine>,
    pub shipping: ShippingDetails,
    /// Totals displayed to the customer, checked against the server's.
    pub totals: OrderTotals,
    pub idempotency_key: Option<String>,
}
