//! Delete Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Delete Review Handler
///
/// Moderation endpoint for admins.
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Review deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let review = review.into_inner();

    state
        .app
        .reviews
        .delete_review(review.into())
        .await
        .map_err(into_status_error)?;

    info!(review_uuid = %review, "removed review");

    Ok(StatusCode::NO_CONTENT)
}
