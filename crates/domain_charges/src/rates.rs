//! Rate and fee resolution
//!
//! Looks up protection-plan and extra-driver daily rates from the charge
//! configuration and exposes the fixed regulatory per-day fees. Resolution
//! never fails: a missing table entry degrades to a documented fallback
//! rate so that fee lookup can never block document generation.

use tracing::debug;

use core_kernel::{Currency, Money, Rate};
use domain_booking::{AgeBand, ProtectionPlan, VehicleCategory};

use crate::config::ChargeConfig;
use crate::error::ChargeError;

/// Regulatory per-day fees, fixed platform-wide in cents
///
/// These are statutory pass-through charges, not configuration: they change
/// with legislation, via a code change.
pub const VEHICLE_LICENCE_FEE_CENTS_PER_DAY: i64 = 185;
pub const ROAD_SAFETY_LEVY_CENTS_PER_DAY: i64 = 49;

pub const VEHICLE_LICENCE_FEE_LABEL: &str = "Vehicle Licence Recovery Fee";
pub const ROAD_SAFETY_LEVY_LABEL: &str = "Road Safety Levy";

/// Fallback protection daily rates (cents) when a loaded table is missing a
/// (plan, category) pair
const FALLBACK_PROTECTION_CENTS: [(ProtectionPlan, i64); 3] = [
    (ProtectionPlan::Basic, 1100),
    (ProtectionPlan::Standard, 1700),
    (ProtectionPlan::Premium, 2600),
];

/// A named per-day regulatory fee
#[derive(Debug, Clone, Copy)]
pub struct RegulatoryFee {
    pub label: &'static str,
    pub per_day: Money,
}

/// Resolves daily rates against a charge configuration
pub struct RateResolver<'a> {
    config: &'a ChargeConfig,
    currency: Currency,
}

impl<'a> RateResolver<'a> {
    /// Creates a resolver for one booking's currency
    pub fn new(config: &'a ChargeConfig, currency: Currency) -> Self {
        Self { config, currency }
    }

    /// Returns the currency this resolver prices in
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Resolves the protection-plan daily rate for a vehicle category
    ///
    /// A (plan, category) pair absent from the table resolves to the
    /// plan-level fallback rate rather than erroring.
    pub fn protection_rate(
        &self,
        plan: ProtectionPlan,
        category: VehicleCategory,
    ) -> Result<Money, ChargeError> {
        if let Some(entry) = self
            .config
            .protection_rates
            .iter()
            .find(|r| r.plan == plan && r.category == category)
        {
            return Ok(Money::from_decimal(entry.daily_rate, self.currency)?);
        }

        let fallback = FALLBACK_PROTECTION_CENTS
            .iter()
            .find(|(p, _)| *p == plan)
            .map(|(_, cents)| *cents)
            .unwrap_or(FALLBACK_PROTECTION_CENTS[1].1);
        debug!(?plan, ?category, fallback_cents = fallback, "protection rate missing from table, using fallback");
        Ok(Money::from_cents(fallback, self.currency))
    }

    /// Resolves the extra-driver daily rate for an age band
    pub fn driver_rate(&self, age_band: AgeBand) -> Result<Money, ChargeError> {
        let daily = match age_band {
            AgeBand::Standard => self.config.driver_rates.standard_daily,
            AgeBand::Young => self.config.driver_rates.young_daily,
        };
        Ok(Money::from_decimal(daily, self.currency)?)
    }

    /// Returns the two fixed regulatory per-day fees
    pub fn regulatory_fees(&self) -> [RegulatoryFee; 2] {
        [
            RegulatoryFee {
                label: VEHICLE_LICENCE_FEE_LABEL,
                per_day: Money::from_cents(VEHICLE_LICENCE_FEE_CENTS_PER_DAY, self.currency),
            },
            RegulatoryFee {
                label: ROAD_SAFETY_LEVY_LABEL,
                per_day: Money::from_cents(ROAD_SAFETY_LEVY_CENTS_PER_DAY, self.currency),
            },
        ]
    }

    /// Returns the primary tax rate from configuration
    pub fn primary_tax_rate(&self) -> Rate {
        Rate::from_percentage(self.config.primary_tax_percent)
    }
}
