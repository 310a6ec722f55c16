//! Wishlist Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mayfield_app::domain::wishlist::records::{WishlistEntry, WishlistItemRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WishlistItemResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: String,
}

impl From<WishlistItemRecord> for WishlistItemResponse {
    fn from(item: WishlistItemRecord) -> Self {
        WishlistItemResponse {
            id: item.uuid.into(),
            user_id: item.user_uuid.into(),
            product_id: item.product_uuid.into(),
            created_at: item.created_at.to_string(),
        }
    }
}

/// A wishlist item with a summary of its product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WishlistEntryResponse {
    #[serde(flatten)]
    pub item: WishlistItemResponse,

    pub product_name: String,
    pub product_price: u64,
    pub product_image: String,
}

impl From<WishlistEntry> for WishlistEntryResponse {
    fn from(entry: WishlistEntry) -> Self {
        WishlistEntryResponse {
            item: entry.item.into(),
            product_name: entry.product_name,
            product_price: entry.product_price,
            product_image: entry.product_image,
        }
    }
}
