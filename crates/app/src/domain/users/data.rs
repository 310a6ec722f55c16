//! User Data

use crate::domain::users::records::UserUuid;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Profile Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

/// Normalise and validate an email address.
pub(crate) fn normalise_email(email: &str) -> Option<String> {
    let email = email.trim();

    let (local, domain) = email.split_once('@')?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }

    Some(email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_email_lowercases_and_trims() {
        assert_eq!(
            normalise_email("  Jo@Example.COM "),
            Some("jo@example.com".to_string())
        );
    }

    #[test]
    fn normalise_email_rejects_malformed_addresses() {
        assert_eq!(normalise_email("no-at-sign"), None);
        assert_eq!(normalise_email("@example.com"), None);
        assert_eq!(normalise_email("jo@"), None);
        assert_eq!(normalise_email("jo@a@b"), None);
    }
}
