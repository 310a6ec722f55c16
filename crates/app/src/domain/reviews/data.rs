//! Review Data

use std::ops::RangeInclusive;

use crate::domain::{
    products::records::ProductUuid, reviews::records::ReviewUuid, users::records::UserUuid,
};

pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// New Review Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub rating: i64,
    pub comment: String,
    /// Order the reviewer bought the product in, if claimed.
    pub order_number: Option<String>,
}

impl NewReview {
    /// Validated rating.
    pub(crate) fn checked_rating(&self) -> Option<u8> {
        if RATING_RANGE.contains(&self.rating) {
            u8::try_from(self.rating).ok()
        } else {
            None
        }
    }
}
