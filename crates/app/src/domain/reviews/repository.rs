//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    products::records::ProductUuid,
    reviews::records::{RatingSummary, ReviewRecord, ReviewUuid},
    users::records::UserUuid,
};

const PRODUCT_IS_LISTED_SQL: &str = include_str!("sql/product_is_listed.sql");
const ORDER_INCLUDES_PRODUCT_SQL: &str = include_str!("sql/order_includes_product.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_REVIEWS_FOR_PRODUCT_SQL: &str = include_str!("sql/list_reviews_for_product.sql");
const LIST_REVIEWS_FOR_USER_SQL: &str = include_str!("sql/list_reviews_for_user.sql");
const RATING_SUMMARY_SQL: &str = include_str!("sql/rating_summary.sql");
const DELETE_REVIEW_SQL: &str = include_str!("sql/delete_review.sql");

/// Column values for a new review row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReviewInsert<'a> {
    pub(crate) uuid: ReviewUuid,
    pub(crate) user_uuid: UserUuid,
    pub(crate) product_uuid: ProductUuid,
    pub(crate) rating: u8,
    pub(crate) comment: &'a str,
    pub(crate) order_number: Option<&'a str>,
    pub(crate) verified: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn product_is_listed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(PRODUCT_IS_LISTED_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn order_includes_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(ORDER_INCLUDES_PRODUCT_SQL)
            .bind(order_number)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewInsert<'_>,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(review.user_uuid.into_uuid())
            .bind(review.product_uuid.into_uuid())
            .bind(i16::from(review.rating))
            .bind(review.comment)
            .bind(review.order_number)
            .bind(review.verified)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews_for_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_REVIEWS_FOR_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_REVIEWS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn rating_summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<RatingSummary, sqlx::Error> {
        let row = query(RATING_SUMMARY_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let count: i64 = row.try_get("review_count")?;

        Ok(RatingSummary {
            count: u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
                index: "review_count".to_string(),
                source: Box::new(e),
            })?,
            average: row.try_get("average_rating")?,
        })
    }

    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_REVIEW_SQL)
            .bind(review.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating_i16: i16 = row.try_get("rating")?;

        let rating = u8::try_from(rating_i16).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ReviewUuid::try_get(row, "uuid")?,
            user_uuid: UserUuid::try_get(row, "user_uuid")?,
            reviewer_name: row.try_get("reviewer_name")?,
            product_uuid: ProductUuid::try_get(row, "product_uuid")?,
            rating,
            comment: row.try_get("comment")?,
            order_number: row.try_get("order_number")?,
            verified: row.try_get("verified")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
