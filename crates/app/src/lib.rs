//! Shared storefront domain, persistence, and delivery modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod mailer;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
