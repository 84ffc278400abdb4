//! Charge configuration
//!
//! Rate tables and thresholds consumed per render request. Loading follows
//! the platform convention: optional file source, then environment
//! overrides. A configuration source that cannot be read must never block
//! document generation, so `load` falls back to the documented defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::warn;

use domain_booking::{ProtectionPlan, VehicleCategory};

/// A protection-plan daily rate for one (plan, category) pair
#[derive(Debug, Clone, Deserialize)]
pub struct ProtectionRate {
    pub plan: ProtectionPlan,
    pub category: VehicleCategory,
    pub daily_rate: Decimal,
}

/// Extra-driver daily rates by age band
#[derive(Debug, Clone, Deserialize)]
pub struct DriverRates {
    pub standard_daily: Decimal,
    pub young_daily: Decimal,
}

impl Default for DriverRates {
    fn default() -> Self {
        Self {
            standard_daily: dec!(12.00),
            young_daily: dec!(19.00),
        }
    }
}

/// Charge configuration consumed per render request
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeConfig {
    /// Protection-plan rate table keyed by (plan, category)
    #[serde(default = "default_protection_rates")]
    pub protection_rates: Vec<ProtectionRate>,
    /// Extra-driver daily rates
    #[serde(default)]
    pub driver_rates: DriverRates,
    /// Primary tax rate as a percentage of subtotal (e.g. 7.0 for 7%)
    #[serde(default = "default_primary_tax_percent")]
    pub primary_tax_percent: Decimal,
    /// Nominal secondary tax rate, consumed by quoting. Document
    /// rendering never applies it: the secondary component is always the
    /// remainder of the persisted tax total.
    #[serde(default = "default_secondary_tax_percent")]
    pub secondary_tax_percent: Decimal,
    /// Upper sanity bound for the reconciliation remainder, expressed as a
    /// multiple of the naive vehicle base. The observed production value is
    /// 10; it is configurable rather than hard-coded because the bound is
    /// an empirical heuristic.
    #[serde(default = "default_reconciliation_bound")]
    pub reconciliation_bound_multiplier: i64,
}

fn default_primary_tax_percent() -> Decimal {
    dec!(7.00)
}

fn default_secondary_tax_percent() -> Decimal {
    dec!(5.00)
}

fn default_reconciliation_bound() -> i64 {
    10
}

/// Fallback protection-plan rate table
///
/// Used whenever the configuration source is unavailable, and as the
/// per-plan fallback when a (plan, category) pair is missing from a loaded
/// table.
fn default_protection_rates() -> Vec<ProtectionRate> {
    use ProtectionPlan::*;
    use VehicleCategory::*;

    let mut rates = Vec::with_capacity(18);
    for (category, basic, standard, premium) in [
        (Economy, dec!(9.00), dec!(14.00), dec!(22.00)),
        (Compact, dec!(9.00), dec!(14.00), dec!(22.00)),
        (Sedan, dec!(11.00), dec!(17.00), dec!(26.00)),
        (Suv, dec!(13.00), dec!(20.00), dec!(31.00)),
        (Van, dec!(13.00), dec!(20.00), dec!(31.00)),
        (Luxury, dec!(18.00), dec!(28.00), dec!(42.00)),
    ] {
        rates.push(ProtectionRate { plan: Basic, category, daily_rate: basic });
        rates.push(ProtectionRate { plan: Standard, category, daily_rate: standard });
        rates.push(ProtectionRate { plan: Premium, category, daily_rate: premium });
    }
    rates
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            protection_rates: default_protection_rates(),
            driver_rates: DriverRates::default(),
            primary_tax_percent: default_primary_tax_percent(),
            secondary_tax_percent: default_secondary_tax_percent(),
            reconciliation_bound_multiplier: default_reconciliation_bound(),
        }
    }
}

impl ChargeConfig {
    /// Loads configuration from an optional `config/charges` file plus
    /// `CHARGES_*` environment overrides
    ///
    /// Falls back to `Default` on any failure; fee resolution must never
    /// block document generation.
    pub fn load() -> Self {
        let built = config::Config::builder()
            .add_source(config::File::with_name("config/charges").required(false))
            .add_source(config::Environment::with_prefix("CHARGES").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize::<ChargeConfig>());

        match built {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "charge configuration unavailable, using defaults");
                Self::default()
            }
        }
    }
}
