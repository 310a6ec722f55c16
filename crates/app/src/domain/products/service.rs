//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductAttributes, ProductFilter},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::{PgProductsRepository, StoredAttributes},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

fn stored(attributes: &ProductAttributes) -> Result<StoredAttributes<'_>, ProductsServiceError> {
    attributes
        .validate()
        .map_err(ProductsServiceError::Validation)?;

    Ok(StoredAttributes {
        attributes,
        price: i64::try_from(attributes.price)?,
        stock: i32::try_from(attributes.stock)?,
    })
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let stored = stored(&product.attributes)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product.uuid, stored)
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductAttributes,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let stored = stored(&update)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, stored)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product = %product, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products visible in the catalog.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the attributes of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductAttributes,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Removes a product from the catalog. Existing order lines keep referencing it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
