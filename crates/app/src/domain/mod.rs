//! Storefront Domain Concerns

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod reviews;
pub mod stats;
pub mod users;
pub mod wishlist;
