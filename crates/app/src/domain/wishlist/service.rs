//! Wishlist service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        users::records::UserUuid,
        wishlist::{
            errors::WishlistServiceError,
            records::{WishlistEntry, WishlistItemRecord, WishlistItemUuid},
            repository::PgWishlistRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistService {
    db: Db,
    repository: PgWishlistRepository,
}

impl PgWishlistService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWishlistRepository::new(),
        }
    }
}

#[async_trait]
impl WishlistService for PgWishlistService {
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, WishlistServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository
            .add_item(&mut tx, WishlistItemUuid::new(), user, product)
            .await?;

        let item = self.repository.get_item(&mut tx, user, product).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.remove_item(&mut tx, user, product).await?;

        tx.commit().await?;

        if rows_affected == 0 {
            debug!(user = %user, product = %product, "wishlist item already absent");
        }

        Ok(())
    }

    async fn list_items(&self, user: UserUuid) -> Result<Vec<WishlistEntry>, WishlistServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Adds a product to a user's wishlist, returning the existing entry if present.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, WishlistServiceError>;

    /// Removes a product from a user's wishlist. Absent entries are not an error.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistServiceError>;

    /// A user's wishlist, newest first.
    async fn list_items(&self, user: UserUuid) -> Result<Vec<WishlistEntry>, WishlistServiceError>;
}
