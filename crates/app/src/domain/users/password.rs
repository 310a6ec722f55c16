//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use tokio::task;

use crate::domain::users::UsersServiceError;

/// Hash a password on the blocking pool.
pub(super) async fn hash_password_off_thread(password: String) -> Result<String, UsersServiceError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_join_error| UsersServiceError::PasswordHash)?
}

/// Verify a password on the blocking pool.
pub(super) async fn verify_password_off_thread(
    password: String,
    hash: String,
) -> Result<(), UsersServiceError> {
    task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_join_error| UsersServiceError::PasswordHash)?
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, UsersServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_hash_error| UsersServiceError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), UsersServiceError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_parse_error| UsersServiceError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_mismatch| UsersServiceError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("correct horse").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).is_ok());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("correct horse").expect("hashing should succeed");

        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(UsersServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn off_thread_hashing_round_trips() -> TestResult {
        let hash = hash_password_off_thread("correct horse".to_string()).await?;

        verify_password_off_thread("correct horse".to_string(), hash.clone()).await?;

        assert!(matches!(
            verify_password_off_thread("battery staple".to_string(), hash).await,
            Err(UsersServiceError::InvalidCredentials)
        ));

        Ok(())
    }
}
