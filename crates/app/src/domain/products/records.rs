//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    /// Unit price in minor currency units.
    pub price: u64,
    pub description: String,
    pub details: String,
    pub image: String,
    pub weight: String,
    pub origin: String,
    pub season: String,
    pub nutritional: String,
    pub stock: u32,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
