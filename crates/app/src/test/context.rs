//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{
        addresses::PgAddressesService, carts::PgCartsService, orders::PgOrdersService,
        pricing::PricingPolicy, products::PgProductsService, reviews::PgReviewsService,
        stats::PgStatsService, users::PgUsersService, wishlist::PgWishlistService,
    },
    mailer::LogMailer,
};

use super::db::TestDb;

/// Services wired to a fresh, migrated database.
///
/// Outgoing email goes to [`LogMailer`], so nothing leaves the test process.
pub struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub addresses: PgAddressesService,
    pub reviews: PgReviewsService,
    pub wishlist: PgWishlistService,
    pub stats: PgStatsService,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_pricing(PricingPolicy::default()).await
    }

    pub async fn with_pricing(pricing: PricingPolicy) -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let mailer = Arc::new(LogMailer);

        Self {
            users: PgUsersService::new(db.clone(), mailer.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone(), pricing),
            orders: PgOrdersService::new(db.clone(), pricing, mailer),
            addresses: PgAddressesService::new(db.clone()),
            reviews: PgReviewsService::new(db.clone()),
            wishlist: PgWishlistService::new(db.clone()),
            stats: PgStatsService::new(db),
            db: test_db,
        }
    }
}
