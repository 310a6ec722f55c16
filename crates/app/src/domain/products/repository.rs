//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query, query_as,
    query::QueryAs,
};

use crate::domain::products::{
    data::{ProductAttributes, ProductFilter},
    records::{ProductRecord, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Attributes in their column representation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StoredAttributes<'a> {
    pub(crate) attributes: &'a ProductAttributes,
    pub(crate) price: i64,
    pub(crate) stock: i32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.featured_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stored: StoredAttributes<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        bind_attributes(
            query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL).bind(product.into_uuid()),
            stored,
        )
        .fetch_one(&mut **tx)
        .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stored: StoredAttributes<'_>,
    ) -> Result<ProductRecord, sqlx::Error> {
        bind_attributes(
            query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL).bind(product.into_uuid()),
            stored,
        )
        .fetch_one(&mut **tx)
        .await
    }

    /// Soft-deletes a product, returning the number of rows affected.
    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn bind_attributes<'q>(
    query: QueryAs<'q, Postgres, ProductRecord, PgArguments>,
    stored: StoredAttributes<'q>,
) -> QueryAs<'q, Postgres, ProductRecord, PgArguments> {
    let attributes = stored.attributes;

    query
        .bind(attributes.name.trim())
        .bind(stored.price)
        .bind(attributes.description.as_str())
        .bind(attributes.details.as_str())
        .bind(attributes.image.as_str())
        .bind(attributes.weight.as_str())
        .bind(attributes.origin.as_str())
        .bind(attributes.season.as_str())
        .bind(attributes.nutritional.as_str())
        .bind(stored.stock)
        .bind(attributes.featured)
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;
        let stock_i32: i32 = row.try_get("stock")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::try_get(row, "uuid")?,
            name: row.try_get("name")?,
            price,
            description: row.try_get("description")?,
            details: row.try_get("details")?,
            image: row.try_get("image")?,
            weight: row.try_get("weight")?,
            origin: row.try_get("origin")?,
            season: row.try_get("season")?,
            nutritional: row.try_get("nutritional")?,
            stock,
            featured: row.try_get("featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
