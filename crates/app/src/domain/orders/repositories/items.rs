//! Order Items Repository

use std::collections::HashMap;

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
        products::records::ProductUuid,
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &OrderItemRecord,
    ) -> Result<(), sqlx::Error> {
        let quantity = i32::try_from(item.quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.order_uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(quantity)
            .bind(encode_amount(item.price)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Items of the given orders, grouped by order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<HashMap<OrderUuid, Vec<OrderItemRecord>>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|o| o.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            grouped.entry(item.order_uuid).or_default().push(item);
        }

        Ok(grouped)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderItemUuid::try_get(row, "uuid")?,
            order_uuid: OrderUuid::try_get(row, "order_uuid")?,
            product_uuid: ProductUuid::try_get(row, "product_uuid")?,
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
            quantity,
            price: try_get_amount(row, "price")?,
        })
    }
}
