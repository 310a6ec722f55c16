//! Wishlist Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Wishlist Item UUID
pub type WishlistItemUuid = TypedUuid<WishlistItemRecord>;

/// Wishlist Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItemRecord {
    pub uuid: WishlistItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub created_at: Timestamp,
}

/// A wishlist item with the product it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistEntry {
    pub item: WishlistItemRecord,
    pub product_name: String,
    pub product_price: u64,
    pub product_image: String,
}
