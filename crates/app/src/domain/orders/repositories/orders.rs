//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        orders::{
            records::{OrderRecord, OrderUuid, ShippingDetails},
            status::OrderStatus,
        },
        pricing::OrderTotals,
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const FIND_ORDER_BY_IDEMPOTENCY_KEY_SQL: &str =
    include_str!("../sql/find_order_by_idempotency_key.sql");
const GET_ORDER_BY_NUMBER_SQL: &str = include_str!("../sql/get_order_by_number.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("../sql/list_orders_for_user.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");

/// Column values for a new order row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderInsert<'a> {
    pub(crate) uuid: OrderUuid,
    pub(crate) order_number: &'a str,
    pub(crate) user_uuid: UserUuid,
    pub(crate) idempotency_key: Option<&'a str>,
    pub(crate) shipping: &'a ShippingDetails,
    pub(crate) totals: &'a OrderTotals,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts an order, returning `None` if a unique key already exists.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderInsert<'_>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let shipping = order.shipping;
        let totals = order.totals;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.order_number)
            .bind(order.user_uuid.into_uuid())
            .bind(order.idempotency_key)
            .bind(shipping.full_name.trim())
            .bind(shipping.email.trim())
            .bind(shipping.phone.trim())
            .bind(shipping.address.trim())
            .bind(shipping.city.trim())
            .bind(shipping.state.trim())
            .bind(shipping.zip_code.trim())
            .bind(shipping.country.trim())
            .bind(encode_amount(totals.subtotal)?)
            .bind(encode_amount(totals.shipping)?)
            .bind(encode_amount(totals.tax)?)
            .bind(encode_amount(totals.total)?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_order_by_idempotency_key(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        idempotency_key: &str,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(FIND_ORDER_BY_IDEMPOTENCY_KEY_SQL)
            .bind(user.into_uuid())
            .bind(idempotency_key)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_by_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_BY_NUMBER_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await
    }

    /// Reads an order and holds a row lock on it until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::try_get(row, "uuid")?,
            order_number: row.try_get("order_number")?,
            user_uuid: UserUuid::try_get(row, "user_uuid")?,
            idempotency_key: row.try_get("idempotency_key")?,
            status,
            shipping: ShippingDetails {
                full_name: row.try_get("shipping_full_name")?,
                email: row.try_get("shipping_email")?,
                phone: row.try_get("shipping_phone")?,
                address: row.try_get("shipping_address")?,
                city: row.try_get("shipping_city")?,
                state: row.try_get("shipping_state")?,
                zip_code: row.try_get("shipping_zip_code")?,
                country: row.try_get("shipping_country")?,
            },
            totals: OrderTotals {
                subtotal: try_get_amount(row, "subtotal")?,
                shipping: try_get_amount(row, "shipping")?,
                tax: try_get_amount(row, "tax")?,
                total: try_get_amount(row, "total")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
