//! Review Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::reviews::records::ReviewRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub product_id: Uuid,

    /// 1 to 5
    pub rating: u8,

    pub comment: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    /// Whether the reviewer bought the product in the referenced order
    pub verified: bool,

    pub created_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        ReviewResponse {
            id: review.uuid.into(),
            user_id: review.user_uuid.into(),
            user_name: review.reviewer_name,
            product_id: review.product_uuid.into(),
            rating: review.rating,
            comment: review.comment,
            order_number: review.order_number,
            verified: review.verified,
            created_at: review.created_at.to_string(),
        }
    }
}
