//! Orders

pub mod data;
pub mod errors;
pub mod order_number;
pub mod records;
mod repositories;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
