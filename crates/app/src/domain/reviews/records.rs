//! Review Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub reviewer_name: String,
    pub product_uuid: ProductUuid,
    pub rating: u8,
    pub comment: String,
    pub order_number: Option<String>,
    /// Set when the review was tied to an order containing the product.
    pub verified: bool,
    pub created_at: Timestamp,
}

/// Aggregate rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub count: u64,
    pub average: Option<f64>,
}

/// Reviews of a single product with their aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductReviews {
    pub reviews: Vec<ReviewRecord>,
    pub summary: RatingSummary,
}
