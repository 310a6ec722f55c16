//! Carts service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::CartLine,
            errors::CartsServiceError,
            records::{CartQuote, CatalogPrice, PricedLine},
            repository::PgCartsRepository,
        },
        pricing::PricingPolicy,
        products::records::ProductUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
    policy: PricingPolicy,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, policy: PricingPolicy) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
            policy,
        }
    }
}

/// Price cart lines against the catalog as seen by `tx`.
pub(crate) async fn quote_lines(
    tx: &mut Transaction<'_, Postgres>,
    repository: &PgCartsRepository,
    lines: &[CartLine],
    policy: &PricingPolicy,
) -> Result<CartQuote, CartsServiceError> {
    validate_lines(lines)?;

    let products: Vec<ProductUuid> = lines.iter().map(|line| line.product_uuid).collect();

    let catalog = repository.catalog_prices(tx, &products).await?;

    price_lines(lines, &catalog, policy)
}

fn validate_lines(lines: &[CartLine]) -> Result<(), CartsServiceError> {
    if lines.is_empty() {
        return Err(CartsServiceError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    if lines.iter().any(|line| line.quantity == 0) {
        return Err(CartsServiceError::Validation(
            "Quantity must be greater than zero".to_string(),
        ));
    }

    // Quantities are stored as INTEGER.
    if lines.iter().any(|line| i32::try_from(line.quantity).is_err()) {
        return Err(CartsServiceError::Validation(
            "Quantity is too large".to_string(),
        ));
    }

    Ok(())
}

fn price_lines(
    lines: &[CartLine],
    catalog: &HashMap<ProductUuid, CatalogPrice>,
    policy: &PricingPolicy,
) -> Result<CartQuote, CartsServiceError> {
    let out_of_range = || CartsServiceError::Validation("Order total out of range".to_string());

    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal: u64 = 0;

    for line in lines {
        let product = catalog.get(&line.product_uuid).ok_or_else(|| {
            CartsServiceError::Validation(format!("Unknown product {}", line.product_uuid))
        })?;

        let line_total = product
            .price
            .checked_mul(u64::from(line.quantity))
            .ok_or_else(out_of_range)?;

        subtotal = subtotal.checked_add(line_total).ok_or_else(out_of_range)?;

        priced.push(PricedLine {
            product_uuid: product.uuid,
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity: line.quantity,
            line_total,
        });
    }

    let totals = policy.totals_for(subtotal).ok_or_else(out_of_range)?;

    // Amounts are stored as BIGINT; the total bounds every other amount.
    if i64::try_from(totals.total).is_err() {
        return Err(out_of_range());
    }

    Ok(CartQuote {
        lines: priced,
        totals,
    })
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn quote(&self, lines: Vec<CartLine>) -> Result<CartQuote, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let quote = quote_lines(&mut tx, &self.repository, &lines, &self.policy).await?;

        tx.commit().await?;

        Ok(quote)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Prices a client-held cart with shipping and tax.
    async fn quote(&self, lines: Vec<CartLine>) -> Result<CartQuote, CartsServiceError>;
}
