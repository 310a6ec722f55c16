//! Pricing Config

use clap::Args;

use mayfield_app::domain::pricing::{
    DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FLAT_RATE, PricingPolicy,
};

/// Shipping and tax settings, in minor currency units.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Flat shipping charge
    #[arg(long, env = "SHIPPING_FLAT_RATE", default_value_t = DEFAULT_SHIPPING_FLAT_RATE)]
    pub shipping_flat_rate: u64,

    /// Subtotal at or above which shipping is free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = DEFAULT_FREE_SHIPPING_THRESHOLD)]
    pub free_shipping_threshold: u64,

    /// Tax rate in basis points (2000 = 20%)
    #[arg(long, env = "TAX_RATE_BPS", default_value_t = 0)]
    pub tax_rate_bps: u32,
}

impl PricingConfig {
    pub(crate) fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            shipping_flat_rate: self.shipping_flat_rate,
            free_shipping_threshold: self.free_shipping_threshold,
            tax_rate_bps: self.tax_rate_bps,
        }
    }
}
