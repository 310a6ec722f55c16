//! Carts Repository

use std::collections::HashMap;

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::{carts::records::CatalogPrice, products::records::ProductUuid},
};

const CATALOG_PRICES_SQL: &str = include_str!("sql/catalog_prices.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Current prices of the given products, keyed by product. Deleted
    /// products are absent.
    pub(crate) async fn catalog_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<HashMap<ProductUuid, CatalogPrice>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|p| p.into_uuid()).collect();

        let prices = query_as::<Postgres, CatalogPrice>(CATALOG_PRICES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        Ok(prices.into_iter().map(|price| (price.uuid, price)).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogPrice {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::try_get(row, "uuid")?,
            name: row.try_get("name")?,
            image: row.try_get("image")?,
            price: try_get_amount(row, "price")?,
        })
    }
}
