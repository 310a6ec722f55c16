//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::users::{
        data::{MIN_PASSWORD_LENGTH, NewUser, ProfileUpdate, normalise_email},
        errors::UsersServiceError,
        password::{hash_password_off_thread, verify_password_off_thread},
        records::{Role, UserRecord, UserUuid},
        repository::PgUsersRepository,
        reset::{RESET_TOKEN_TTL, generate_reset_token, hash_reset_token},
    },
    mailer::{Mailer, dispatch, messages},
};

#[derive(Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for PgUsersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUsersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            mailer,
        }
    }
}

fn validate_password(password: &str) -> Result<(), UsersServiceError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UsersServiceError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

fn validate_profile(name: &str, email: &str) -> Result<(String, String), UsersServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(UsersServiceError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    let email = normalise_email(email)
        .ok_or_else(|| UsersServiceError::Validation("Invalid email address".to_string()))?;

    Ok((name.to_string(), email))
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser, role: Role) -> Result<UserRecord, UsersServiceError> {
        let (name, email) = validate_profile(&user.name, &user.email)?;

        validate_password(&user.password)?;

        let password_hash = hash_password_off_thread(user.password.clone()).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, user.uuid, &name, &email, &password_hash, role)
            .await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "user created");

        Ok(created)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, UsersServiceError> {
        let email = normalise_email(email).ok_or(UsersServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_email(&mut tx, &email)
            .await?
            .ok_or(UsersServiceError::InvalidCredentials)?;

        tx.commit().await?;

        verify_password_off_thread(password.to_string(), user.password_hash.clone()).await?;

        Ok(user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let (name, email) = validate_profile(&update.name, &update.email)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_profile(&mut tx, user, &name, &email)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_role(&self, user: UserUuid, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_role(&mut tx, user, role).await?;

        tx.commit().await?;

        info!(user = %updated.uuid, role = %updated.role, "user role changed");

        Ok(updated)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), UsersServiceError> {
        let Some(email) = normalise_email(email) else {
            return Ok(());
        };

        let mut tx = self.db.begin().await?;

        let Some(user) = self.repository.find_user_by_email(&mut tx, &email).await? else {
            debug!("password reset requested for unknown email");

            return Ok(());
        };

        let token = generate_reset_token();

        let expires_at = Timestamp::now()
            .checked_add(RESET_TOKEN_TTL)
            .map_err(|_range_error| UsersServiceError::InvalidData)?;

        self.repository
            .store_password_reset(&mut tx, user.uuid, &hash_reset_token(&token), expires_at)
            .await?;

        tx.commit().await?;

        dispatch(
            Arc::clone(&self.mailer),
            messages::password_reset(&user.name, &user.email, &token),
        );

        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<UserRecord, UsersServiceError> {
        validate_password(new_password)?;

        let password_hash = hash_password_off_thread(new_password.to_string()).await?;

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .reset_password(&mut tx, &hash_reset_token(token), &password_hash, Timestamp::now())
            .await?
            .ok_or(UsersServiceError::InvalidResetToken)?;

        tx.commit().await?;

        info!(user = %user.uuid, "password reset");

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Registers a new account with the given role.
    async fn create_user(&self, user: NewUser, role: Role) -> Result<UserRecord, UsersServiceError>;

    /// Checks an email and password pair, returning the matching user.
    async fn authenticate(&self, email: &str, password: &str)
    -> Result<UserRecord, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Lists every account, newest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    async fn set_role(&self, user: UserUuid, role: Role) -> Result<UserRecord, UsersServiceError>;

    /// Issues a reset token and emails it. Unknown addresses succeed silently.
    async fn request_password_reset(&self, email: &str) -> Result<(), UsersServiceError>;

    /// Exchanges a reset token for a new password.
    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<UserRecord, UsersServiceError>;
}
