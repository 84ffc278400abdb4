//! Charge statement assembly
//!
//! The single entry point the document adapters call: validate the
//! booking, compute the cent-precision breakdown, reconcile the vehicle
//! charge against the persisted subtotal, split the tax total, and emit
//! the ordered line items. Pure and synchronous; every statement is
//! derived fresh from its inputs.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_booking::Booking;

use crate::calculator::ChargeBreakdown;
use crate::config::ChargeConfig;
use crate::error::ChargeError;
use crate::line_items::{build_line_items, ChargeLineItem};
use crate::rates::RateResolver;
use crate::reconcile::resolve_vehicle_charge;
use crate::tax::{split, TaxBreakdown};

/// The complete priced view of one booking
///
/// This is the operational charge summary, the structured payload of a
/// fresh document render, and the financial payload captured into a
/// snapshot at signing or issuing time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeStatement {
    /// Ordered non-tax charge lines
    pub line_items: Vec<ChargeLineItem>,
    /// Reconstructed tax components
    pub tax: TaxBreakdown,
    /// Persisted pre-tax subtotal
    pub subtotal: Money,
    /// Persisted combined tax total
    pub tax_total: Money,
    /// Persisted grand total
    pub grand_total: Money,
    /// False when the vehicle line fell back to rate times days because
    /// the reconciliation remainder failed the sanity bound
    pub vehicle_charge_reconciled: bool,
}

impl ChargeStatement {
    /// Sum of the non-tax line items
    pub fn items_total(&self) -> Money {
        self.line_items
            .iter()
            .fold(Money::zero(self.subtotal.currency()), |acc, item| {
                acc + item.amount
            })
    }

    /// True when the displayed items sum to the displayed subtotal
    ///
    /// Holds whenever the vehicle charge was reconciled; a fallback
    /// statement is explicitly allowed to differ.
    pub fn balances(&self) -> bool {
        self.items_total() == self.subtotal
    }
}

/// Prices a booking into a charge statement
pub fn build_statement(
    booking: &Booking,
    config: &ChargeConfig,
) -> Result<ChargeStatement, ChargeError> {
    let currency = booking.currency;
    let resolver = RateResolver::new(config, currency);

    let breakdown = ChargeBreakdown::compute(booking, &resolver)?;

    let subtotal = Money::from_decimal(booking.subtotal, currency)?;
    let tax_total = Money::from_decimal(booking.tax_total, currency)?;
    let grand_total = Money::from_decimal(booking.grand_total, currency)?;

    let vehicle = resolve_vehicle_charge(
        subtotal,
        breakdown.non_vehicle_total(),
        breakdown.vehicle_base,
        config.reconciliation_bound_multiplier,
    );

    let line_items = build_line_items(booking, &breakdown, &vehicle, &resolver)?;
    let tax = split(subtotal, tax_total, resolver.primary_tax_rate());

    Ok(ChargeStatement {
        line_items,
        tax,
        subtotal,
        tax_total,
        grand_total,
        vehicle_charge_reconciled: vehicle.reconciled,
    })
}
