//! Cent-precision charge calculation
//!
//! Converts every monetary fact on a booking to integer cents exactly once
//! and computes independent per-category totals. Nothing here touches the
//! persisted aggregates; reconciling against them is the next stage.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_booking::Booking;

use crate::error::ChargeError;
use crate::rates::RateResolver;

/// Charge for one extra driver: positive override wins, else band rate
/// times day count
pub(crate) fn driver_charge(
    driver: &domain_booking::ExtraDriver,
    resolver: &RateResolver<'_>,
    days: u32,
) -> Result<Money, ChargeError> {
    match driver.fee_override {
        Some(fee) if fee.is_sign_positive() && !fee.is_zero() => {
            Ok(Money::from_decimal(fee, resolver.currency())?)
        }
        _ => Ok(resolver.driver_rate(driver.age_band)?.times(days)),
    }
}

/// Per-category integer totals for one booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    /// Naive vehicle base: daily rate times day count
    pub vehicle_base: Money,
    /// Protection plan: daily rate times day count, zero when no plan
    pub protection: Money,
    /// Add-ons summed as persisted
    pub add_ons: Money,
    /// Extra drivers: override when positive, else band rate times days
    pub extra_drivers: Money,
    /// Young-driver surcharge as persisted
    pub young_driver: Money,
    /// Different drop-off fee as persisted
    pub dropoff: Money,
    /// Delivery fee as persisted
    pub delivery: Money,
    /// Upgrade: daily upgrade fee times day count
    pub upgrade: Money,
    /// Vehicle licence recovery fee: fixed per-day amount times day count
    pub licence_fee: Money,
    /// Road safety levy: fixed per-day amount times day count
    pub road_levy: Money,
}

impl ChargeBreakdown {
    /// Computes all category totals for a booking
    pub fn compute(booking: &Booking, resolver: &RateResolver<'_>) -> Result<Self, ChargeError> {
        booking.validate()?;

        let currency = booking.currency;
        let days = booking.days;

        let daily_rate = Money::from_decimal(booking.daily_rate, currency)?;
        let vehicle_base = daily_rate.times(days);

        let protection = match booking.protection_plan {
            Some(plan) => resolver.protection_rate(plan, booking.category)?.times(days),
            None => Money::zero(currency),
        };

        let mut add_ons = Money::zero(currency);
        for addon in &booking.add_ons {
            // Persisted price covers the full quantity; summed as stored.
            add_ons = add_ons.checked_add(&Money::from_decimal(addon.price, currency)?)?;
        }

        let mut extra_drivers = Money::zero(currency);
        for driver in &booking.extra_drivers {
            let charge = driver_charge(driver, resolver, days)?;
            extra_drivers = extra_drivers.checked_add(&charge)?;
        }

        let [licence, levy] = resolver.regulatory_fees();

        Ok(Self {
            vehicle_base,
            protection,
            add_ons,
            extra_drivers,
            young_driver: Money::from_decimal(booking.young_driver_fee, currency)?,
            dropoff: Money::from_decimal(booking.different_dropoff_fee, currency)?,
            delivery: Money::from_decimal(booking.delivery_fee, currency)?,
            upgrade: Money::from_decimal(booking.daily_upgrade_fee, currency)?.times(days),
            licence_fee: licence.per_day.times(days),
            road_levy: levy.per_day.times(days),
        })
    }

    /// Sum of every category except the vehicle base
    ///
    /// This is the amount subtracted from the persisted subtotal to obtain
    /// the reconciliation remainder.
    pub fn non_vehicle_total(&self) -> Money {
        self.protection
            + self.add_ons
            + self.extra_drivers
            + self.young_driver
            + self.dropoff
            + self.delivery
            + self.upgrade
            + self.licence_fee
            + self.road_levy
    }
}
