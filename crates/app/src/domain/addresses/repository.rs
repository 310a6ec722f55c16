//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    addresses::{
        data::AddressFields,
        records::{AddressRecord, AddressUuid},
    },
    users::records::UserUuid,
};

const LOCK_USER_SQL: &str = include_str!("sql/lock_user.sql");
const COUNT_ADDRESSES_SQL: &str = include_str!("sql/count_addresses.sql");
const CLEAR_DEFAULT_SQL: &str = include_str!("sql/clear_default.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const UPDATE_ADDRESS_SQL: &str = include_str!("sql/update_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");
const PROMOTE_NEWEST_ADDRESS_SQL: &str = include_str!("sql/promote_newest_address.sql");
const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Takes a row lock on the owning user, serialising address writes for
    /// that user until the transaction ends. Returns `false` if the user does
    /// not exist.
    pub(crate) async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<bool, sqlx::Error> {
        let locked: Option<Uuid> = query_scalar(LOCK_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(locked.is_some())
    }

    pub(crate) async fn count_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_ADDRESSES_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Clears the default flag on every address of `user` except `keep`.
    pub(crate) async fn clear_default(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        keep: AddressUuid,
    ) -> Result<(), sqlx::Error> {
        query(CLEAR_DEFAULT_SQL)
            .bind(user.into_uuid())
            .bind(keep.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: AddressUuid,
        user: UserUuid,
        fields: &AddressFields,
        is_default: bool,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(CREATE_ADDRESS_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(fields.full_name.trim())
            .bind(fields.phone.trim())
            .bind(fields.address.trim())
            .bind(fields.city.trim())
            .bind(fields.state.trim())
            .bind(fields.zip_code.trim())
            .bind(fields.country.trim())
            .bind(is_default)
            .fetch_one(&mut **tx)
            .await
    }

    /// Rewrites an address. The current default keeps its flag; it only moves
    /// when another address is made default.
    pub(crate) async fn update_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: AddressUuid,
        user: UserUuid,
        fields: &AddressFields,
        make_default: bool,
    ) -> Result<AddressRecord, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(UPDATE_ADDRESS_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(fields.full_name.trim())
            .bind(fields.phone.trim())
            .bind(fields.address.trim())
            .bind(fields.city.trim())
            .bind(fields.state.trim())
            .bind(fields.zip_code.trim())
            .bind(fields.country.trim())
            .bind(make_default)
            .fetch_one(&mut **tx)
            .await
    }

    /// Deletes an address, returning whether it was the default, or `None`
    /// when the address does not belong to `user`.
    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: AddressUuid,
        user: UserUuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        query_scalar(DELETE_ADDRESS_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn promote_newest_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(PROMOTE_NEWEST_ADDRESS_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<AddressRecord>, sqlx::Error> {
        query_as::<Postgres, AddressRecord>(LIST_ADDRESSES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AddressRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddressUuid::try_get(row, "uuid")?,
            user_uuid: UserUuid::try_get(row, "user_uuid")?,
            full_name: row.try_get("full_name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            zip_code: row.try_get("zip_code")?,
            country: row.try_get("country")?,
            is_default: row.try_get("is_default")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
