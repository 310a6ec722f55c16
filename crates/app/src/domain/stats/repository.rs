//! Stats Repository

use std::collections::HashMap;

use sqlx::{Postgres, Row, Transaction, query};

use crate::{
    database::try_get_amount,
    domain::{
        orders::status::OrderStatus,
        stats::records::{StatusCount, StoreStats},
    },
};

const STORE_TOTALS_SQL: &str = include_str!("sql/store_totals.sql");
const ORDERS_BY_STATUS_SQL: &str = include_str!("sql/orders_by_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn store_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<StoreStats, sqlx::Error> {
        let totals = query(STORE_TOTALS_SQL).fetch_one(&mut **tx).await?;

        let rows = query(ORDERS_BY_STATUS_SQL).fetch_all(&mut **tx).await?;

        let mut by_status = HashMap::with_capacity(rows.len());

        for row in &rows {
            let status: String = row.try_get("status")?;

            let status = status
                .parse::<OrderStatus>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(e),
                })?;

            by_status.insert(status, try_get_amount(row, "order_count")?);
        }

        Ok(StoreStats {
            users: try_get_amount(&totals, "user_count")?,
            products: try_get_amount(&totals, "product_count")?,
            orders: try_get_amount(&totals, "order_count")?,
            orders_by_status: OrderStatus::ALL
                .into_iter()
                .map(|status| StatusCount {
                    status,
                    count: by_status.get(&status).copied().unwrap_or(0),
                })
                .collect(),
            revenue: try_get_amount(&totals, "revenue")?,
        })
    }
}
