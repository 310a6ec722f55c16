//! Wishlist Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::try_get_amount,
    domain::{
        products::records::ProductUuid,
        users::records::UserUuid,
        wishlist::records::{WishlistEntry, WishlistItemRecord, WishlistItemUuid},
    },
};

const ADD_ITEM_SQL: &str = include_str!("sql/add_item.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const REMOVE_ITEM_SQL: &str = include_str!("sql/remove_item.sql");
const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistRepository;

impl PgWishlistRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the pair unless it is already present.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: WishlistItemUuid,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADD_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(GET_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn remove_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistEntry>, sqlx::Error> {
        query_as::<Postgres, WishlistEntry>(LIST_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WishlistItemUuid::try_get(row, "uuid")?,
            user_uuid: UserUuid::try_get(row, "user_uuid")?,
            product_uuid: ProductUuid::try_get(row, "product_uuid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            item: WishlistItemRecord::from_row(row)?,
            product_name: row.try_get("product_name")?,
            product_price: try_get_amount(row, "product_price")?,
            product_image: row.try_get("product_image")?,
        })
    }
}
