//! Property-Based Test Generators
//!
//! Proptest strategies for generating random domain data that maintains
//! the record-level invariants a persisted booking would satisfy.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_booking::Booking;

use crate::builders::BookingBuilder;

/// Strategy for positive amounts in minor units
pub fn positive_cents_strategy() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy for amounts in minor units, negative included
pub fn cents_strategy() -> impl Strategy<Value = i64> {
    -100_000_000i64..100_000_000i64
}

/// Strategy for positive USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_cents_strategy().prop_map(|cents| Money::from_cents(cents, Currency::USD))
}

/// Strategy for two-decimal-place positive decimals, as stored amounts
pub fn stored_amount_strategy() -> impl Strategy<Value = Decimal> {
    positive_cents_strategy().prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for chargeable bookings with arbitrary rates, durations,
/// ad-hoc fees, and persisted aggregates
///
/// The aggregates are independent of the itemized facts, mirroring
/// production data where staff adjust subtotals out-of-band.
pub fn booking_strategy() -> impl Strategy<Value = Booking> {
    (
        1u32..30u32,
        1000i64..30_000i64,
        0i64..20_000i64,
        1i64..5_000_000i64,
        0i64..200_000i64,
    )
        .prop_map(|(days, rate_cents, delivery_cents, subtotal_cents, tax_cents)| {
            BookingBuilder::new()
                .with_days(days)
                .with_daily_rate(Decimal::new(rate_cents, 2))
                .with_delivery_fee(Decimal::new(delivery_cents, 2))
                .with_subtotal(Decimal::new(subtotal_cents, 2))
                .with_tax_total(Decimal::new(tax_cents, 2))
                .with_grand_total(Decimal::new(subtotal_cents + tax_cents, 2))
                .build()
        })
}
