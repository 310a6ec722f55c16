//! Cart Records

use crate::domain::{pricing::OrderTotals, products::records::ProductUuid};

/// Current catalog price of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPrice {
    pub uuid: ProductUuid,
    pub name: String,
    pub image: String,
    pub price: u64,
}

/// A cart line priced at the current catalog price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub image: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

/// Server-computed prices for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartQuote {
    pub lines: Vec<PricedLine>,
    pub totals: OrderTotals,
}
