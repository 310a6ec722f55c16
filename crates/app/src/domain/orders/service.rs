//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{quote_lines, repository::PgCartsRepository},
        orders::{
            data::{MAX_IDEMPOTENCY_KEY_LENGTH, NewOrder},
            errors::OrdersServiceError,
            order_number::{generate_order_number, normalise_order_number},
            records::{
                OrderDetail, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid, PlacedOrder,
            },
            repositories::{OrderInsert, PgOrderItemsRepository, PgOrdersRepository},
            status::{OrderStatus, Transition},
        },
        pricing::{PricingPolicy, TOTALS_TOLERANCE},
        users::records::UserUuid,
    },
    mailer::{Mailer, dispatch, messages},
};

/// Attempts at drawing an unused order number before giving up.
const ORDER_NUMBER_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    carts: PgCartsRepository,
    policy: PricingPolicy,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, policy: PricingPolicy, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            carts: PgCartsRepository::new(),
            policy,
            mailer,
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderDetail>, OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items = self.items.get_order_items(tx, &uuids).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderDetail {
                items: items.remove(&order.uuid).unwrap_or_default(),
                order,
            })
            .collect())
    }

    async fn detail(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderRecord,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let mut items = self.items.get_order_items(tx, &[order.uuid]).await?;

        Ok(OrderDetail {
            items: items.remove(&order.uuid).unwrap_or_default(),
            order,
        })
    }

    async fn find_replay(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        idempotency_key: Option<&str>,
    ) -> Result<Option<OrderDetail>, OrdersServiceError> {
        let Some(key) = idempotency_key else {
            return Ok(None);
        };

        match self.orders.find_order_by_idempotency_key(tx, user, key).await? {
            Some(order) => Ok(Some(self.detail(tx, order).await?)),
            None => Ok(None),
        }
    }
}

fn validate(order: &NewOrder) -> Result<Option<String>, OrdersServiceError> {
    if order.lines.is_empty() || !order.shipping.is_complete() {
        return Err(OrdersServiceError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    let key = order
        .idempotency_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());

    if key.is_some_and(|key| key.len() > MAX_IDEMPOTENCY_KEY_LENGTH) {
        return Err(OrdersServiceError::Validation(format!(
            "Idempotency key must be at most {MAX_IDEMPOTENCY_KEY_LENGTH} characters"
        )));
    }

    Ok(key.map(str::to_string))
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError> {
        let idempotency_key = validate(&order)?;

        let mut tx = self.db.begin().await?;

        if let Some(detail) = self
            .find_replay(&mut tx, order.user_uuid, idempotency_key.as_deref())
            .await?
        {
            tx.commit().await?;

            debug!(order = %detail.order.uuid, "replayed order for idempotency key");

            return Ok(PlacedOrder {
                detail,
                created: false,
            });
        }

        let quote = quote_lines(&mut tx, &self.carts, &order.lines, &self.policy).await?;

        if !quote.totals.agrees_with(&order.totals, TOTALS_TOLERANCE) {
            warn!(
                user = %order.user_uuid,
                submitted = order.totals.total,
                computed = quote.totals.total,
                "order totals do not match"
            );

            return Err(OrdersServiceError::Validation(
                "Order totals do not match".to_string(),
            ));
        }

        let mut created = None;

        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let order_number = generate_order_number();

            let inserted = self
                .orders
                .create_order(
                    &mut tx,
                    OrderInsert {
                        uuid: order.uuid,
                        order_number: &order_number,
                        user_uuid: order.user_uuid,
                        idempotency_key: idempotency_key.as_deref(),
                        shipping: &order.shipping,
                        totals: &quote.totals,
                    },
                )
                .await?;

            if inserted.is_some() {
                created = inserted;
                break;
            }

            // A concurrent request with the same key committed first.
            if let Some(detail) = self
                .find_replay(&mut tx, order.user_uuid, idempotency_key.as_deref())
                .await?
            {
                tx.commit().await?;

                return Ok(PlacedOrder {
                    detail,
                    created: false,
                });
            }
        }

        let record = created.ok_or(OrdersServiceError::AlreadyExists)?;

        let mut items = Vec::with_capacity(quote.lines.len());

        for line in quote.lines {
            let item = OrderItemRecord {
                uuid: OrderItemUuid::new(),
                order_uuid: record.uuid,
                product_uuid: line.product_uuid,
                product_name: line.name,
                product_image: line.image,
                quantity: line.quantity,
                price: line.unit_price,
            };

            self.items.create_order_item(&mut tx, &item).await?;

            items.push(item);
        }

        tx.commit().await?;

        info!(
            order = %record.uuid,
            order_number = %record.order_number,
            user = %record.user_uuid,
            total = record.totals.total,
            "order created"
        );

        let detail = OrderDetail {
            order: record,
            items,
        };

        dispatch(
            Arc::clone(&self.mailer),
            messages::order_confirmation(&detail),
        );

        Ok(PlacedOrder {
            detail,
            created: true,
        })
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderDetail>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders_for_user(&mut tx, user).await?;
        let details = self.with_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn list_orders(&self) -> Result<Vec<OrderDetail>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx).await?;
        let details = self.with_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.lock_order(&mut tx, order).await?;

        let record = match current.status.transition_to(status)? {
            Transition::Unchanged => current,
            Transition::Changed => {
                let updated = self
                    .orders
                    .update_order_status(&mut tx, order, status)
                    .await?;

                info!(
                    order = %order,
                    from = %current.status,
                    to = %updated.status,
                    "order status changed"
                );

                updated
            }
        };

        let detail = self.detail(&mut tx, record).await?;

        tx.commit().await?;

        Ok(detail)
    }

    async fn track_order(&self, order_number: &str) -> Result<OrderDetail, OrdersServiceError> {
        let order_number = normalise_order_number(order_number);

        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .get_order_by_number(&mut tx, &order_number)
            .await?;

        let detail = self.detail(&mut tx, order).await?;

        tx.commit().await?;

        Ok(detail)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order from a client-held cart.
    ///
    /// Prices are taken from the live catalog and the submitted totals must
    /// agree with them. Resubmitting with the same idempotency key returns
    /// the original order.
    async fn create_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError>;

    /// A user's orders, newest first.
    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderDetail>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderDetail>, OrdersServiceError>;

    /// Moves an order to a new status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderDetail, OrdersServiceError>;

    /// Looks an order up by its customer-facing number.
    async fn track_order(&self, order_number: &str) -> Result<OrderDetail, OrdersServiceError>;
}
