//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::order_number::normalise_order_number,
        products::records::ProductUuid,
        reviews::{
            data::NewReview,
            errors::ReviewsServiceError,
            records::{ProductReviews, ReviewRecord, ReviewUuid},
            repository::{PgReviewsRepository, ReviewInsert},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn create_review(&self, review: NewReview) -> Result<ReviewRecord, ReviewsServiceError> {
        let comment = review.comment.trim();

        if comment.is_empty() {
            return Err(ReviewsServiceError::Validation(
                "Missing required fields".to_string(),
            ));
        }

        let rating = review.checked_rating().ok_or_else(|| {
            ReviewsServiceError::Validation("Rating must be between 1 and 5".to_string())
        })?;

        let order_number = review
            .order_number
            .as_deref()
            .map(normalise_order_number)
            .filter(|number| !number.is_empty());

        let mut tx = self.db.begin().await?;

        if !self
            .repository
            .product_is_listed(&mut tx, review.product_uuid)
            .await?
        {
            return Err(ReviewsServiceError::Validation(
                "Product not found".to_string(),
            ));
        }

        let verified = match order_number.as_deref() {
            Some(number) => {
                let purchased = self
                    .repository
                    .order_includes_product(&mut tx, number, review.user_uuid, review.product_uuid)
                    .await?;

                if !purchased {
                    return Err(ReviewsServiceError::Validation(
                        "Order does not include this product".to_string(),
                    ));
                }

                true
            }
            None => false,
        };

        let created = self
            .repository
            .create_review(
                &mut tx,
                ReviewInsert {
                    uuid: review.uuid,
                    user_uuid: review.user_uuid,
                    product_uuid: review.product_uuid,
                    rating,
                    comment,
                    order_number: order_number.as_deref(),
                    verified,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            review = %created.uuid,
            product = %created.product_uuid,
            rating = created.rating,
            verified = created.verified,
            "review created"
        );

        Ok(created)
    }

    async fn list_reviews_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductReviews, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_reviews_for_product(&mut tx, product)
            .await?;

        let summary = self.repository.rating_summary(&mut tx, product).await?;

        tx.commit().await?;

        Ok(ProductReviews { reviews, summary })
    }

    async fn list_reviews_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_reviews_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn delete_review(&self, review: ReviewUuid) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_review(&mut tx, review).await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(review = %review, "review deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Records a review. Reviews tied to a matching order are marked verified.
    async fn create_review(&self, review: NewReview) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Reviews of a product, newest first, with the average rating.
    async fn list_reviews_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductReviews, ReviewsServiceError>;

    async fn list_reviews_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    /// Removes a review.
    async fn delete_review(&self, review: ReviewUuid) -> Result<(), ReviewsServiceError>;
}
