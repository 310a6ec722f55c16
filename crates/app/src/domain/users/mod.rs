//! Users

pub mod data;
pub mod errors;
mod password;
pub mod records;
mod repository;
mod reset;
pub mod service;

pub use errors::UsersServiceError;
pub use service::*;
