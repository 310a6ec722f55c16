//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, HmacAuthService, SigningKey},
    database::{self, Db},
    domain::{
        addresses::{AddressesService, PgAddressesService},
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        pricing::PricingPolicy,
        products::{PgProductsService, ProductsService},
        reviews::{PgReviewsService, ReviewsService},
        stats::{PgStatsService, StatsService},
        users::{PgUsersService, UsersService},
        wishlist::{PgWishlistService, WishlistService},
    },
    mailer::Mailer,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Settings shared by the services.
pub struct AppSettings {
    pub pricing: PricingPolicy,
    pub signing_key: SigningKey,
    pub token_ttl: SignedDuration,
    pub mailer: Arc<dyn Mailer>,
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub addresses: Arc<dyn AddressesService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub wishlist: Arc<dyn WishlistService>,
    pub stats: Arc<dyn StatsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first. The pool holds at most `max_connections` connections.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        settings: AppSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(&Db::new(pool), settings))
    }

    #[must_use]
    pub fn from_db(db: &Db, settings: AppSettings) -> Self {
        let AppSettings {
            pricing,
            signing_key,
            token_ttl,
            mailer,
        } = settings;

        Self {
            users: Arc::new(PgUsersService::new(db.clone(), Arc::clone(&mailer))),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone(), pricing)),
            orders: Arc::new(PgOrdersService::new(db.clone(), pricing, mailer)),
            addresses: Arc::new(PgAddressesService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            wishlist: Arc::new(PgWishlistService::new(db.clone())),
            stats: Arc::new(PgStatsService::new(db.clone())),
            auth: Arc::new(HmacAuthService::new(signing_key, token_ttl)),
        }
    }
}
