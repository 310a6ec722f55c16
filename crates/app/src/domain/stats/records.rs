//! Stats Records

use crate::domain::orders::status::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub users: u64,
    /// Products currently listed.
    pub products: u64,
    pub orders: u64,
    /// One entry per status, including those with no orders.
    pub orders_by_status: Vec<StatusCount>,
    /// Sum of totals of orders that were not cancelled.
    pub revenue: u64,
}
