//! Order numbers.
//!
//! `MF` followed by twelve symbols from a 32 character alphabet with no
//! easily confused characters, giving 60 bits drawn from the OS RNG.

use rand::{RngCore, rngs::OsRng};

pub const ORDER_NUMBER_PREFIX: &str = "MF";

const ORDER_NUMBER_SYMBOLS: usize = 12;

const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generate a fresh order number.
pub fn generate_order_number() -> String {
    let mut bytes = [0u8; ORDER_NUMBER_SYMBOLS];

    OsRng.fill_bytes(&mut bytes);

    let symbols: String = bytes
        .iter()
        .filter_map(|byte| ALPHABET.get(usize::from(byte & 0x1f)))
        .map(|&symbol| char::from(symbol))
        .collect();

    format!("{ORDER_NUMBER_PREFIX}{symbols}")
}

/// Canonical form of a customer-supplied order number.
pub fn normalise_order_number(order_number: &str) -> String {
    order_number.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_numbers_have_prefix_and_alphabet() {
        let number = generate_order_number();

        assert_eq!(number.len(), ORDER_NUMBER_PREFIX.len() + ORDER_NUMBER_SYMBOLS);
        assert!(number.starts_with(ORDER_NUMBER_PREFIX));
        assert!(
            number
                .bytes()
                .skip(ORDER_NUMBER_PREFIX.len())
                .all(|b| ALPHABET.contains(&b))
        );
    }

    #[test]
    fn generated_numbers_do_not_repeat() {
        let numbers: HashSet<String> = (0..10_000).map(|_| generate_order_number()).collect();

        assert_eq!(numbers.len(), 10_000);
    }

    #[test]
    fn normalise_uppercases_and_trims() {
        assert_eq!(normalise_order_number(" mfabc234 "), "MFABC234");
    }
}
