//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use mayfield_app::domain::reviews::{data::NewReview, records::ReviewUuid};

use crate::{
    extensions::*,
    reviews::{ReviewResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReviewRequest {
    pub user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub rating: Option<i64>,
    pub comment: Option<String>,

    /// Order the product was bought in; marks the review verified
    pub order_number: Option<String>,
}

/// Create Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    responses(
        (status_code = StatusCode::CREATED, description = "Review recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields, rating out of range or order does not match"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        rating = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let (Some(user), Some(product), Some(rating), Some(comment)) = (
        request.user_id,
        request.product_id,
        request.rating,
        request.comment,
    ) else {
        return Err(StatusError::bad_request().brief("Missing required fields"));
    };

    depot.authorize_user(user.into())?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));
    span.record("rating", rating);

    let review = state
        .app
        .reviews
        .create_review(NewReview {
            uuid: ReviewUuid::new(),
            user_uuid: user.into(),
            product_uuid: product.into(),
            rating,
            comment,
            order_number: request.order_number.filter(|number| !number.trim().is_empty()),
        })
        .await
        .map_err(into_status_error)?;

    info!(review_uuid = %review.uuid, verified = review.verified, "recorded review");

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use mayfield_app::domain::{
        products::records::ProductUuid,
        reviews::{MockReviewsService, ReviewsServiceError},
        users::records::UserUuid,
    };

    use crate::test_helpers::{TestApp, make_review};

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        TestApp {
            reviews: Some(reviews),
            ..TestApp::default()
        }
        .service(Router::with_path("reviews").post(handler))
    }

    fn review_body(rating: i64, order_number: Option<&str>) -> Value {
        json!({
            "userId": UserUuid::new().into_uuid(),
            "productId": ProductUuid::new().into_uuid(),
            "rating": rating,
            "comment": "Sweet and crunchy",
            "orderNumber": order_number,
        })
    }

    #[tokio::test]
    async fn test_create_verified_review() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .withf(|review| {
                review.rating == 5 && review.order_number.as_deref() == Some("MFABCDEFGHJKLM")
            })
            .returning(|review| {
                let mut record =
                    make_review(review.uuid, review.user_uuid, review.product_uuid, 5);

                record.order_number = review.order_number;
                record.verified = true;

                Ok(record)
            });

        let mut res = TestClient::post("http://example.com/reviews")
            .json(&review_body(5, Some("MFABCDEFGHJKLM")))
            .send(&make_service(reviews))
            .await;

        let body: ReviewResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.verified);

        Ok(())
    }

    #[tokio::test]
    async fn test_rating_out_of_range_returns_400() -> TestResult {
        for rating in [0, 6] {
            let mut reviews = MockReviewsService::new();

            reviews.expect_create_review().once().return_once(|_| {
                Err(ReviewsServiceError::Validation(
                    "Rating must be between 1 and 5".to_string(),
                ))
            });

            let res = TestClient::post("http://example.com/reviews")
                .json(&review_body(rating, None))
                .send(&make_service(reviews))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "rating {rating}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_comment_returns_400() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews.expect_create_review().never();

        let mut body = review_body(4, None);

        if let Some(fields) = body.as_object_mut() {
            fields.remove("comment");
        }

        let res = TestClient::post("http://example.com/reviews")
            .json(&body)
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
