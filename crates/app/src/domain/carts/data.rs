//! Cart Data

use crate::domain::products::records::ProductUuid;

/// A single line of a client-held cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}
