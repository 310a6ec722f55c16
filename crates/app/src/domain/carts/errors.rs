//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("storage error")]
    Sql(#[from] Error),
}
