//! Review Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    reviews::{ReviewResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
    pub count: u64,

    /// Mean rating of the product, absent when it has no reviews or when
    /// listing by user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

/// Review Index Handler
///
/// Lists reviews newest first, by `productId` or by `userId`. One of the two
/// is required; `productId` wins when both are given.
#[endpoint(
    tags("reviews"),
    summary = "List Reviews",
    responses(
        (status_code = StatusCode::OK, description = "Reviews"),
        (status_code = StatusCode::BAD_REQUEST, description = "Neither productId nor userId given"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Some(product) = req.query_uuid("productId")? {
        let listing = state
            .app
            .reviews
            .list_reviews_for_product(product.into())
            .await
            .map_err(into_status_error)?;

        return Ok(Json(ReviewsResponse {
            reviews: listing.reviews.into_iter().map(Into::into).collect(),
            count: listing.summary.count,
            average_rating: listing.summary.average,
        }));
    }

    let Some(user) = req.query_uuid("userId")? else {
        return Err(StatusError::bad_request().brief("productId or userId is required"));
    };

    depot.authorize_user(user.into())?;

    let reviews = state
        .app
        .reviews
        .list_reviews_for_user(user.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReviewsResponse {
        count: u64::try_from(reviews.len()).unwrap_or(u64::MAX),
        reviews: reviews.into_iter().map(Into::into).collect(),
        average_rating: None,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use mayfield_app::domain::{
        products::records::ProductUuid,
        reviews::{
            MockReviewsService,
            records::{ProductReviews, RatingSummary, ReviewUuid},
        },
        users::records::UserUuid,
    };

    use crate::test_helpers::{TestApp, make_review};

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        TestApp {
            reviews: Some(reviews),
            ..TestApp::default()
        }
        .service(Router::with_path("reviews").get(handler))
    }

    #[tokio::test]
    async fn test_list_reviews_for_product_includes_average() -> TestResult {
        let product = ProductUuid::new();

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_reviews_for_product()
            .once()
            .withf(move |p| *p == product)
            .return_once(move |_| {
                Ok(ProductReviews {
                    reviews: vec![
                        make_review(ReviewUuid::new(), UserUuid::new(), product, 5),
                        make_review(ReviewUuid::new(), UserUuid::new(), product, 4),
                    ],
                    summary: RatingSummary {
                        count: 2,
                        average: Some(4.5),
                    },
                })
            });

        let mut res = TestClient::get(format!("http://example.com/reviews?productId={product}"))
            .send(&make_service(reviews))
            .await;

        let body: ReviewsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 2);
        assert_eq!(body.average_rating, Some(4.5));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_reviews_for_user() -> TestResult {
        let user = UserUuid::new();

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_reviews_for_user()
            .once()
            .withf(move |u| *u == user)
            .return_once(move |_| {
                Ok(vec![make_review(
                    ReviewUuid::new(),
                    user,
                    ProductUuid::new(),
                    3,
                )])
            });

        let mut res = TestClient::get(format!("http://example.com/reviews?userId={user}"))
            .send(&make_service(reviews))
            .await;

        let body: ReviewsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 1);
        assert_eq!(body.average_rating, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_reviews_without_filter_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/reviews")
            .send(&make_service(MockReviewsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
