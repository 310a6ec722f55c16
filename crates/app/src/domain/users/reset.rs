//! Password reset tokens.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jiff::SignedDuration;
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Lifetime of a password reset token.
pub const RESET_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(1);

const RESET_TOKEN_BYTES: usize = 32;

/// Generate a random reset token for delivery to the account holder.
pub(super) fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];

    OsRng.fill_bytes(&mut bytes);

    URL_SAFE_NO_PAD.encode(bytes)
}

/// Digest stored in place of the token itself.
pub(super) fn hash_reset_token(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}
