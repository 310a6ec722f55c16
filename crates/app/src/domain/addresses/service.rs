//! Addresses service.
//!
//! Every write locks the owning user row first, so default swaps for one
//! user are applied one at a time. The partial unique index on
//! `(user_uuid) WHERE is_default` backs the single-default invariant.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        addresses::{
            data::{AddressFields, AddressUpdate, NewAddress},
            errors::AddressesServiceError,
            records::{AddressRecord, AddressUuid},
            repository::PgAddressesRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }

    async fn lock_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), AddressesServiceError> {
        if self.repository.lock_user(tx, user).await? {
            Ok(())
        } else {
            Err(AddressesServiceError::UnknownUser)
        }
    }
}

fn validate(fields: &AddressFields) -> Result<(), AddressesServiceError> {
    if fields.is_complete() {
        Ok(())
    } else {
        Err(AddressesServiceError::Validation(
            "Missing required fields".to_string(),
        ))
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    async fn list_addresses(
        &self,
        user: UserUuid,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx, user).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn create_address(
        &self,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError> {
        validate(&address.fields)?;

        let mut tx = self.db.begin().await?;

        self.lock_user(&mut tx, address.user_uuid).await?;

        let is_first = self
            .repository
            .count_addresses(&mut tx, address.user_uuid)
            .await?
            == 0;

        let is_default = address.is_default || is_first;

        if is_default {
            self.repository
                .clear_default(&mut tx, address.user_uuid, address.uuid)
                .await?;
        }

        let created = self
            .repository
            .create_address(
                &mut tx,
                address.uuid,
                address.user_uuid,
                &address.fields,
                is_default,
            )
            .await?;

        tx.commit().await?;

        debug!(address = %created.uuid, user = %created.user_uuid, is_default, "address created");

        Ok(created)
    }

    async fn update_address(
        &self,
        address: AddressUuid,
        user: UserUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError> {
        validate(&update.fields)?;

        let mut tx = self.db.begin().await?;

        self.lock_user(&mut tx, user).await?;

        if update.is_default {
            self.repository.clear_default(&mut tx, user, address).await?;
        }

        let updated = self
            .repository
            .update_address(&mut tx, address, user, &update.fields, update.is_default)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_address(
        &self,
        address: AddressUuid,
        user: UserUuid,
    ) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_user(&mut tx, user).await?;

        let was_default = self
            .repository
            .delete_address(&mut tx, address, user)
            .await?
            .ok_or(AddressesServiceError::NotFound)?;

        if was_default {
            self.repository.promote_newest_address(&mut tx, user).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Lists a user's addresses, default first and then newest first.
    async fn list_addresses(
        &self,
        user: UserUuid,
    ) -> Result<Vec<AddressRecord>, AddressesServiceError>;

    /// Saves a new address. A user's first address always becomes the default.
    async fn create_address(
        &self,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Rewrites an address. `is_default = false` never unsets the current
    /// default, so a user with addresses always has one.
    async fn update_address(
        &self,
        address: AddressUuid,
        user: UserUuid,
        update: AddressUpdate,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Deletes an address. Removing the default promotes the newest remaining one.
    async fn delete_address(
        &self,
        address: AddressUuid,
        user: UserUuid,
    ) -> Result<(), AddressesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{address_fields, create_user},
    };

    use super::*;

    fn new_address(user: UserUuid, is_default: bool) -> NewAddress {
        NewAddress {
            uuid: AddressUuid::new(),
            user_uuid: user,
            fields: address_fields(),
            is_default,
        }
    }

    async fn default_count(ctx: &TestContext, user: UserUuid) -> Result<usize, AddressesServiceError> {
        let addresses = ctx.addresses.list_addresses(user).await?;

        Ok(addresses.iter().filter(|a| a.is_default).count())
    }

    #[tokio::test]
    async fn first_address_becomes_default() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;

        let address = ctx
            .addresses
            .create_address(new_address(user.uuid, false))
            .await?;

        assert!(address.is_default);

        let second = ctx
            .addresses
            .create_address(new_address(user.uuid, false))
            .await?;

        assert!(!second.is_default);

        Ok(())
    }

    #[tokio::test]
    async fn new_default_replaces_previous_default() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;

        let first = ctx
            .addresses
            .create_address(new_address(user.uuid, true))
            .await?;

        let second = ctx
            .addresses
            .create_address(new_address(user.uuid, true))
            .await?;

        let addresses = ctx.addresses.list_addresses(user.uuid).await?;

        assert_eq!(default_count(&ctx, user.uuid).await?, 1);
        assert_eq!(addresses.first().map(|a| a.uuid), Some(second.uuid));
        assert_eq!(addresses.get(1).map(|a| a.uuid), Some(first.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn update_to_default_clears_other_default() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;

        let first = ctx
            .addresses
            .create_address(new_address(user.uuid, true))
            .await?;

        let second = ctx
            .addresses
            .create_address(new_address(user.uuid, false))
            .await?;

        let updated = ctx
            .addresses
            .update_address(
                second.uuid,
                user.uuid,
                AddressUpdate {
                    fields: address_fields(),
                    is_default: true,
                },
            )
            .await?;

        assert!(updated.is_default);

        let addresses = ctx.addresses.list_addresses(user.uuid).await?;

        assert_eq!(default_count(&ctx, user.uuid).await?, 1);
        assert!(
            addresses
                .iter()
                .any(|a| a.uuid == first.uuid && !a.is_default)
        );

        Ok(())
    }

    #[tokio::test]
    async fn updating_default_without_flag_keeps_it_default() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;

        let first = ctx
            .addresses
            .create_address(new_address(user.uuid, false))
            .await?;

        ctx.addresses
            .create_address(new_address(user.uuid, false))
            .await?;

        let updated = ctx
            .addresses
            .update_address(
                first.uuid,
                user.uuid,
                AddressUpdate {
                    fields: AddressFields {
                        city: "Whitstable".to_string(),
                        ..address_fields()
                    },
                    is_default: false,
                },
            )
            .await?;

        assert!(updated.is_default);
        assert_eq!(updated.city, "Whitstable");
        assert_eq!(default_count(&ctx, user.uuid).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_default_writes_leave_exactly_one_default() -> TestResult {
        let ctx = Arc::new(TestContext::new().await);
        let user = create_user(&ctx, "jo@example.com").await?;

        let mut handles = Vec::new();

        for _ in 0..8 {
            let ctx = Arc::clone(&ctx);
            let user = user.uuid;

            handles.push(tokio::spawn(async move {
                ctx.addresses
                    .create_address(new_address(user, true))
                    .await
            }));
        }

        for handle in handles {
            handle.await??;
        }

        assert_eq!(ctx.addresses.list_addresses(user.uuid).await?.len(), 8);
        assert_eq!(default_count(&ctx, user.uuid).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_requires_ownership() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner@example.com").await?;
        let other = create_user(&ctx, "other@example.com").await?;

        let address = ctx
            .addresses
            .create_address(new_address(owner.uuid, true))
            .await?;

        let result = ctx
            .addresses
            .update_address(
                address.uuid,
                other.uuid,
                AddressUpdate {
                    fields: address_fields(),
                    is_default: true,
                },
            )
            .await;

        assert!(
            matches!(result, Err(AddressesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let delete = ctx.addresses.delete_address(address.uuid, other.uuid).await;

        assert!(matches!(delete, Err(AddressesServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn deleting_default_promotes_newest_remaining() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;

        let first = ctx
            .addresses
            .create_address(new_address(user.uuid, true))
            .await?;

        let second = ctx
            .addresses
            .create_address(new_address(user.uuid, false))
            .await?;

        ctx.addresses.delete_address(first.uuid, user.uuid).await?;

        let addresses = ctx.addresses.list_addresses(user.uuid).await?;

        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses.first().map(|a| (a.uuid, a.is_default)), Some((second.uuid, true)));

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "jo@example.com").await?;

        let result = ctx
            .addresses
            .create_address(NewAddress {
                fields: AddressFields {
                    city: String::new(),
                    ..address_fields()
                },
                ..new_address(user.uuid, false)
            })
            .await;

        assert!(matches!(result, Err(AddressesServiceError::Validation(_))));

        Ok(())
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .addresses
            .create_address(new_address(UserUuid::new(), true))
            .await;

        assert!(matches!(result, Err(AddressesServiceError::UnknownUser)));
    }
}
