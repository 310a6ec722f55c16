//! Session token formatting, parsing, and signing.
//!
//! Tokens take the form `mf_v1_{claims}.{signature}` where `claims` is the
//! base64url (unpadded) JSON encoding of [`Claims`] and `signature` is the
//! lowercase hex HMAC-SHA256 of everything before the `.`.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::Claims;

/// Session token prefix.
pub const TOKEN_PREFIX: &str = "mf";

/// Minimum accepted signing key length in bytes.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

const SIGNATURE_BYTES: usize = 32;

const SIGNATURE_HEX_CHARS: usize = SIGNATURE_BYTES * 2;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    V1,
}

impl TokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for TokenVersion {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(TokenError::UnsupportedVersion),
        }
    }
}

/// HMAC key used to sign and verify session tokens.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Build a signing key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::WeakKey`] when fewer than [`MIN_SIGNING_KEY_BYTES`] are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        if bytes.len() < MIN_SIGNING_KEY_BYTES {
            return Err(TokenError::WeakKey);
        }

        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Generate a random signing key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; MIN_SIGNING_KEY_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self { bytes }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.bytes).map_err(|_invalid_length| TokenError::WeakKey)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(**redacted**)")
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedToken {
    pub version: TokenVersion,
    pub claims: Claims,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token uses an unsupported version")]
    UnsupportedVersion,

    #[error("token claims encoding is invalid")]
    InvalidClaims,

    #[error("token signature encoding is invalid")]
    InvalidSignatureEncoding,

    #[error("token signature does not match")]
    BadSignature,

    #[error("signing key must be at least {MIN_SIGNING_KEY_BYTES} bytes")]
    WeakKey,

    #[error("failed to encode token claims")]
    Encoding(#[source] serde_json::Error),
}

/// Sign `claims` and produce a bearer token.
///
/// # Errors
///
/// Returns an error if the claims cannot be serialised.
pub fn format_token(
    claims: &Claims,
    version: TokenVersion,
    key: &SigningKey,
) -> Result<String, TokenError> {
    let payload = serde_json::to_vec(claims).map_err(TokenError::Encoding)?;

    let signed_part = format!(
        "{TOKEN_PREFIX}_{}_{}",
        version.segment(),
        URL_SAFE_NO_PAD.encode(payload)
    );

    let mut mac = key.mac()?;

    mac.update(signed_part.as_bytes());

    let signature: [u8; SIGNATURE_BYTES] = mac.finalize().into_bytes().into();

    Ok(format!("{signed_part}.{}", encode_hex(&signature)))
}

/// Parse a bearer token and verify its signature.
///
/// Expiry is not checked here; see [`Claims::is_expired`].
///
/// # Errors
///
/// Returns an error for malformed tokens or signatures that do not verify.
pub fn parse_token(token: &str, key: &SigningKey) -> Result<ParsedToken, TokenError> {
    let (signed_part, signature_hex) =
        token.split_once('.').ok_or(TokenError::InvalidFormat)?;

    let mut parts = signed_part.splitn(3, '_');

    let prefix = parts.next().ok_or(TokenError::InvalidFormat)?;
    let version_segment = parts.next().ok_or(TokenError::InvalidFormat)?;
    let claims_segment = parts.next().ok_or(TokenError::InvalidFormat)?;

    if prefix != TOKEN_PREFIX || claims_segment.is_empty() {
        return Err(TokenError::InvalidFormat);
    }

    let version = TokenVersion::from_str(version_segment)?;

    let signature =
        decode_hex(signature_hex).ok_or(TokenError::InvalidSignatureEncoding)?;

    let mut mac = key.mac()?;

    mac.update(signed_part.as_bytes());

    mac.verify_slice(&signature)
        .map_err(|_mismatch| TokenError::BadSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(claims_segment)
        .map_err(|_decode| TokenError::InvalidClaims)?;

    let claims: Claims =
        serde_json::from_slice(&payload).map_err(|_decode| TokenError::InvalidClaims)?;

    Ok(ParsedToken { version, claims })
}

fn encode_hex(bytes: &[u8; SIGNATURE_BYTES]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(SIGNATURE_HEX_CHARS);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

fn decode_hex(hex: &str) -> Option<[u8; SIGNATURE_BYTES]> {
    if hex.len() != SIGNATURE_HEX_CHARS {
        return None;
    }

    let mut decoded = [0_u8; SIGNATURE_BYTES];

    for (byte, pair) in decoded.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(decoded)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::users::records::{Role, UserUuid};

    use super::*;

    fn key() -> SigningKey {
        SigningKey::from_bytes(&[0x42; MIN_SIGNING_KEY_BYTES]).expect("key should be accepted")
    }

    fn claims(role: Role) -> Claims {
        Claims {
            sub: UserUuid::new().into_uuid(),
            role,
            exp: 4_102_444_800,
        }
    }

    #[test]
    fn signed_token_verifies_with_same_key() {
        let claims = claims(Role::Admin);
        let token = format_token(&claims, TokenVersion::V1, &key()).expect("token should sign");
        let parsed = parse_token(&token, &key()).expect("token should verify");

        assert!(token.starts_with("mf_v1_"));
        assert_eq!(parsed.version, TokenVersion::V1);
        assert_eq!(parsed.claims, claims);
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let token =
            format_token(&claims(Role::User), TokenVersion::V1, &SigningKey::generate())
                .expect("token should sign");

        assert!(matches!(
            parse_token(&token, &key()),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn tampered_role_claim_is_rejected() {
        let token = format_token(&claims(Role::User), TokenVersion::V1, &key())
            .expect("token should sign");

        let (_signed_part, signature) = token.split_once('.').expect("token has a signature");
        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&claims(Role::Admin)).expect("claims should serialise"),
        );
        let forged = format!("mf_v1_{forged_claims}.{signature}");

        assert!(matches!(
            parse_token(&forged, &key()),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!(matches!(
            parse_token("nope_v1_e30.00", &key()),
            Err(TokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        assert!(matches!(
            parse_token("mf_v9_e30.00", &key()),
            Err(TokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_signature() {
        assert!(matches!(
            parse_token("mf_v1_e30.abcd", &key()),
            Err(TokenError::InvalidSignatureEncoding)
        ));
    }

    #[test]
    fn short_signing_key_is_rejected() {
        assert!(matches!(
            SigningKey::from_bytes(b"too-short"),
            Err(TokenError::WeakKey)
        ));
    }
}
