//! Extra drivers registered on a booking

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::DriverId;

use crate::booking::AgeBand;

/// An additional driver beyond the primary renter
///
/// Charged per day by age band unless a positive fee override was stored
/// at registration time, in which case the override is the whole charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraDriver {
    /// Unique identifier
    pub id: DriverId,
    /// Driver name as registered
    pub name: String,
    /// Age band for daily-rate lookup
    pub age_band: AgeBand,
    /// Whole-booking fee override; wins over the band rate when positive
    pub fee_override: Option<Decimal>,
}

impl ExtraDriver {
    /// Creates a driver charged at the band rate
    pub fn new(name: impl Into<String>, age_band: AgeBand) -> Self {
        Self {
            id: DriverId::new(),
            name: name.into(),
            age_band,
            fee_override: None,
        }
    }

    /// Sets a fee override
    pub fn with_fee_override(mut self, fee: Decimal) -> Self {
        self.fee_override = Some(fee);
        self
    }
}
