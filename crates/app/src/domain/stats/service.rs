//! Stats service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{
        errors::StatsServiceError, records::StoreStats, repository::PgStatsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn store_stats(&self) -> Result<StoreStats, StatsServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.store_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Headline counts and revenue for the admin dashboard.
    async fn store_stats(&self) -> Result<StoreStats, StatsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::data::CartLine,
            orders::{OrdersService, status::OrderStatus},
            pricing::OrderTotals,
            stats::records::StatusCount,
        },
        test::{
            TestContext,
            helpers::{create_product, create_user, new_order},
        },
    };

    use super::*;

    #[tokio::test]
    async fn empty_store_has_zero_counts() -> TestResult {
        let ctx = TestContext::new().await;

        let stats = ctx.stats.store_stats().await?;

        assert_eq!(stats.users, 0);
        assert_eq!(stats.orders, 0);
        assert_eq!(stats.revenue, 0);
        assert_eq!(stats.orders_by_status.len(), OrderStatus::ALL.len());
        assert!(stats.orders_by_status.iter().all(|c| c.count == 0));

        Ok(())
    }

    #[tokio::test]
    async fn revenue_excludes_cancelled_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;
        let honey = create_product(&ctx, "Honey", 1_200).await?;

        let mut placed = Vec::new();

        for _ in 0..2 {
            placed.push(
                ctx.orders
                    .create_order(new_order(
                        user.uuid,
                        vec![CartLine {
                            product_uuid: honey.uuid,
                            quantity: 1,
                        }],
                        OrderTotals {
                            subtotal: 1_200,
                            shipping: 500,
                            tax: 0,
                            total: 1_700,
                        },
                    ))
                    .await?,
            );
        }

        if let Some(order) = placed.first() {
            ctx.orders
                .update_status(order.detail.order.uuid, OrderStatus::Cancelled)
                .await?;
        }

        let stats = ctx.stats.store_stats().await?;

        assert_eq!(stats.users, 1);
        assert_eq!(stats.products, 1);
        assert_eq!(stats.orders, 2);
        assert_eq!(stats.revenue, 1_700);
        assert!(stats.orders_by_status.contains(&StatusCount {
            status: OrderStatus::Cancelled,
            count: 1,
        }));
        assert!(stats.orders_by_status.contains(&StatusCount {
            status: OrderStatus::Processing,
            count: 1,
        }));

        Ok(())
    }
}
