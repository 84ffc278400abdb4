//! Line-item assembly
//!
//! Builds the ordered, labeled charge lines shown on every surface. The
//! order is fixed: vehicle rental, protection, add-ons in persisted order,
//! extra drivers in registration order, young-driver surcharge, drop-off
//! fee, delivery fee, upgrade, then the two regulatory fees. Zero-amount
//! optional categories are omitted; protection always renders, showing
//! "No Coverage" at zero when no plan was selected. Taxes and totals are
//! not line items; callers append those separately.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_booking::{AgeBand, Booking};

use crate::calculator::{driver_charge, ChargeBreakdown};
use crate::error::ChargeError;
use crate::rates::RateResolver;
use crate::reconcile::VehicleCharge;

/// One labeled charge line
///
/// Derived fresh on every render; persisted only inside a signed or issued
/// document snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLineItem {
    pub description: String,
    pub amount: Money,
    pub quantity: Option<u32>,
}

impl ChargeLineItem {
    fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            amount,
            quantity: None,
        }
    }

    fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// Assembles the ordered charge lines for one booking
pub fn build_line_items(
    booking: &Booking,
    breakdown: &ChargeBreakdown,
    vehicle: &VehicleCharge,
    resolver: &RateResolver<'_>,
) -> Result<Vec<ChargeLineItem>, ChargeError> {
    let currency = booking.currency;
    let days = booking.days;
    let daily_rate = Money::from_decimal(booking.daily_rate, currency)?;

    let mut items = Vec::new();

    items.push(ChargeLineItem::new(
        format!("Daily Rate: {} × {} days", daily_rate, days),
        vehicle.amount,
    ));

    match booking.protection_plan {
        Some(plan) => {
            let rate = resolver.protection_rate(plan, booking.category)?;
            items.push(ChargeLineItem::new(
                format!("{}: {} × {} days", plan.label(), rate, days),
                breakdown.protection,
            ));
        }
        None => {
            items.push(ChargeLineItem::new(
                "Protection: No Coverage",
                Money::zero(currency),
            ));
        }
    }

    for addon in &booking.add_ons {
        let amount = Money::from_decimal(addon.price, currency)?;
        let item = if addon.quantity > 1 {
            ChargeLineItem::new(format!("{} ×{}", addon.name, addon.quantity), amount)
                .with_quantity(addon.quantity)
        } else {
            ChargeLineItem::new(addon.name.clone(), amount)
        };
        items.push(item);
    }

    for driver in &booking.extra_drivers {
        let amount = driver_charge(driver, resolver, days)?;
        let description = match driver.age_band {
            AgeBand::Standard => format!("Additional Driver: {}", driver.name),
            AgeBand::Young => format!("Additional Driver: {} (Young Driver)", driver.name),
        };
        items.push(ChargeLineItem::new(description, amount));
    }

    if !breakdown.young_driver.is_zero() {
        items.push(ChargeLineItem::new(
            "Young Driver Surcharge",
            breakdown.young_driver,
        ));
    }
    if !breakdown.dropoff.is_zero() {
        items.push(ChargeLineItem::new(
            "Different Drop-off Fee",
            breakdown.dropoff,
        ));
    }
    if !breakdown.delivery.is_zero() {
        items.push(ChargeLineItem::new("Delivery Fee", breakdown.delivery));
    }
    if !breakdown.upgrade.is_zero() {
        let daily_upgrade = Money::from_decimal(booking.daily_upgrade_fee, currency)?;
        items.push(ChargeLineItem::new(
            format!("Vehicle Upgrade: {} × {} days", daily_upgrade, days),
            breakdown.upgrade,
        ));
    }

    let [licence, levy] = resolver.regulatory_fees();
    items.push(ChargeLineItem::new(
        format!("{}: {} × {} days", licence.label, licence.per_day, days),
        breakdown.licence_fee,
    ));
    items.push(ChargeLineItem::new(
        format!("{}: {} × {} days", levy.label, levy.per_day, days),
        breakdown.road_levy,
    ));

    Ok(items)
}
