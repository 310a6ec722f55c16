//! Pricing policy: shipping and tax on top of a cart subtotal.
//!
//! All amounts are integer minor currency units. Tax is expressed in basis
//! points and rounded half-up to the nearest minor unit.

use serde::{Deserialize, Serialize};

/// Basis points in one whole.
const BPS_SCALE: u128 = 10_000;

/// Largest per-field difference accepted between client and server totals.
pub const TOTALS_TOLERANCE: u64 = 1;

pub const DEFAULT_SHIPPING_FLAT_RATE: u64 = 500;
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub shipping_flat_rate: u64,
    /// Subtotals at or above this amount ship free.
    pub free_shipping_threshold: u64,
    pub tax_rate_bps: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_flat_rate: DEFAULT_SHIPPING_FLAT_RATE,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            tax_rate_bps: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub shipping: u64,
    pub tax: u64,
    pub total: u64,
}

impl OrderTotals {
    /// Whether every field is within `tolerance` of `other`.
    pub fn agrees_with(&self, other: &Self, tolerance: u64) -> bool {
        [
            (self.subtotal, other.subtotal),
            (self.shipping, other.shipping),
            (self.tax, other.tax),
            (self.total, other.total),
        ]
        .into_iter()
        .all(|(ours, theirs)| ours.abs_diff(theirs) <= tolerance)
    }
}

impl PricingPolicy {
    pub fn shipping_for(&self, subtotal: u64) -> u64 {
        if subtotal == 0 || subtotal >= self.free_shipping_threshold {
            0
        } else {
            self.shipping_flat_rate
        }
    }

    pub fn tax_for(&self, subtotal: u64) -> u64 {
        let scaled = u128::from(subtotal) * u128::from(self.tax_rate_bps);
        let rounded = (scaled + BPS_SCALE / 2) / BPS_SCALE;

        u64::try_from(rounded).unwrap_or(u64::MAX)
    }

    /// Price a subtotal. Returns `None` if the total overflows.
    pub fn totals_for(&self, subtotal: u64) -> Option<OrderTotals> {
        let shipping = self.shipping_for(subtotal);
        let tax = self.tax_for(subtotal);
        let total = subtotal.checked_add(shipping)?.checked_add(tax)?;

        Some(OrderTotals {
            subtotal,
            shipping,
            tax,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(tax_rate_bps: u32) -> PricingPolicy {
        PricingPolicy {
            tax_rate_bps,
            ..PricingPolicy::default()
        }
    }

    #[test]
    fn shipping_is_flat_below_threshold_and_free_at_it() {
        let policy = policy(0);

        assert_eq!(policy.shipping_for(4_999), 500);
        assert_eq!(policy.shipping_for(5_000), 0);
        assert_eq!(policy.shipping_for(12_000), 0);
    }

    #[test]
    fn empty_subtotal_has_no_shipping() {
        assert_eq!(policy(0).shipping_for(0), 0);
    }

    #[test]
    fn tax_rounds_half_up() {
        // 20% of 1.23 is 0.246, rounds to 0.25
        assert_eq!(policy(2_000).tax_for(123), 25);
        // 8.25% of 2.00 is 0.165, rounds to 0.17
        assert_eq!(policy(825).tax_for(200), 17);
        // 8.25% of 1.00 is 0.0825, rounds to 0.08
        assert_eq!(policy(825).tax_for(100), 8);
    }

    #[test]
    fn totals_sum_components() {
        let totals = policy(2_000).totals_for(1_000);

        assert_eq!(
            totals,
            Some(OrderTotals {
                subtotal: 1_000,
                shipping: 500,
                tax: 200,
                total: 1_700,
            })
        );
    }

    #[test]
    fn totals_overflow_is_reported() {
        let policy = PricingPolicy {
            free_shipping_threshold: u64::MAX,
            ..policy(0)
        };

        assert_eq!(policy.totals_for(u64::MAX - 1), None);
    }

    #[test]
    fn agreement_allows_one_unit_of_rounding() {
        let server = OrderTotals {
            subtotal: 1_000,
            shipping: 500,
            tax: 83,
            total: 1_583,
        };

        let client = OrderTotals {
            tax: 82,
            total: 1_582,
            ..server
        };

        assert!(server.agrees_with(&client, TOTALS_TOLERANCE));

        let tampered = OrderTotals {
            total: 1_000,
            ..server
        };

        assert!(!server.agrees_with(&tampered, TOTALS_TOLERANCE));
    }
}
