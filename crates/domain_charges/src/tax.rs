//! Tax reconstruction
//!
//! Storage keeps one combined tax total. Documents must show two
//! components: a rate-based primary tax and everything else. Only the
//! primary component is ever rounded; the secondary is the exact
//! remainder, so the two always sum to the persisted total.

use serde::{Deserialize, Serialize};

use core_kernel::{Money, Rate};

/// Two tax components that sum exactly to the persisted tax total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Rate-based component: round(subtotal × primary rate)
    pub primary: Money,
    /// Remainder component: persisted total minus primary, never rounded
    /// independently; may be zero or negative
    pub secondary: Money,
}

impl TaxBreakdown {
    /// Combined total, identical to the persisted tax total by construction
    pub fn total(&self) -> Money {
        self.primary + self.secondary
    }
}

/// Splits a persisted tax total into primary and secondary components
pub fn split(subtotal: Money, persisted_tax_total: Money, primary_rate: Rate) -> TaxBreakdown {
    let primary = primary_rate.apply(&subtotal);
    let secondary = persisted_tax_total - primary;
    TaxBreakdown { primary, secondary }
}
