//! Carts
//!
//! Carts are held by the client and submitted as a list of lines. This module
//! prices those lines against the live catalog.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
