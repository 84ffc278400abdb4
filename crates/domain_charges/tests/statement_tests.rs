//! Charge Statement Tests
//!
//! End-to-end tests for the pricing pipeline: rate resolution through
//! line-item assembly, exercised via `build_statement`.
//!
//! # Test Organization
//!
//! - `reconciliation_tests` - remainder handling against the persisted subtotal
//! - `sum_invariant_tests` - displayed items sum to the displayed subtotal
//! - `tax_tests` - tax split exactness through the full pipeline

use chrono::{TimeZone, Utc};
use core_kernel::{BookingId, Currency, LocationId, Money, RenterId, VehicleId};
use domain_booking::{
    AgeBand, Booking, BookingAddOn, BookingStatus, ExtraDriver, ProtectionPlan, VehicleCategory,
};
use domain_charges::{build_statement, ChargeConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn booking(days: u32, daily_rate: Decimal, subtotal: Decimal) -> Booking {
    let pickup = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    Booking {
        id: BookingId::new(),
        renter_id: RenterId::new(),
        vehicle_id: VehicleId::new(),
        category: VehicleCategory::Sedan,
        pickup_at: pickup,
        return_at: pickup + chrono::Duration::days(i64::from(days)),
        days,
        daily_rate,
        protection_plan: None,
        add_ons: Vec::new(),
        extra_drivers: Vec::new(),
        young_driver_fee: Decimal::ZERO,
        different_dropoff_fee: Decimal::ZERO,
        delivery_fee: Decimal::ZERO,
        daily_upgrade_fee: Decimal::ZERO,
        pickup_location_id: LocationId::new(),
        dropoff_location_id: LocationId::new(),
        currency: Currency::USD,
        subtotal,
        tax_total: Decimal::ZERO,
        grand_total: subtotal,
        status: BookingStatus::Active,
        created_at: pickup,
        updated_at: pickup,
    }
}

/// Regulatory fees accrued over the rental: (1.85 + 0.49) per day
fn regulatory_cents(days: u32) -> i64 {
    (185 + 49) * i64::from(days)
}

mod reconciliation_tests {
    use super::*;

    /// The worked example: $50.00/day for 3 days, $200.00 subtotal and
    /// $60.00 of non-vehicle charges leave a $140.00 vehicle line.
    #[test]
    fn test_remainder_becomes_vehicle_line() {
        let mut b = booking(3, dec!(50.00), dec!(200.00));
        // Push the non-vehicle total to exactly $60.00: delivery fee of
        // $52.98 plus 3 days of regulatory fees ($7.02).
        b.delivery_fee = dec!(52.98);

        let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert!(statement.vehicle_charge_reconciled);
        assert_eq!(statement.line_items[0].amount.cents(), 14000);
    }

    #[test]
    fn test_corrupt_subtotal_degrades_to_naive_base() {
        // Subtotal below the non-vehicle charges: remainder is negative.
        let b = booking(3, dec!(50.00), dec!(5.00));

        let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert!(!statement.vehicle_charge_reconciled);
        assert_eq!(statement.line_items[0].amount.cents(), 15000);
    }

    #[test]
    fn test_inflated_subtotal_degrades_to_naive_base() {
        // More than 10x the naive base left over after non-vehicle charges.
        let b = booking(3, dec!(50.00), dec!(100000.00));

        let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert!(!statement.vehicle_charge_reconciled);
        assert_eq!(statement.line_items[0].amount.cents(), 15000);
    }

    #[test]
    fn test_bound_multiplier_is_configurable() {
        let config = ChargeConfig {
            reconciliation_bound_multiplier: 1,
            ..ChargeConfig::default()
        };
        // Remainder ≈ $193 > 1x naive base ($150): rejected at 1x,
        // accepted at the default 10x.
        let b = booking(3, dec!(50.00), dec!(200.00));

        let tight = build_statement(&b, &config).unwrap();
        assert!(!tight.vehicle_charge_reconciled);

        let default = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert!(default.vehicle_charge_reconciled);
    }
}

mod sum_invariant_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reconciled_statement_balances_exactly() {
        let mut b = booking(3, dec!(50.00), dec!(200.00));
        b.protection_plan = Some(ProtectionPlan::Standard);
        b.add_ons.push(BookingAddOn::new("GPS Unit", dec!(30.00)));
        b.extra_drivers.push(ExtraDriver::new("Jane Doe", AgeBand::Standard));

        let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert!(statement.vehicle_charge_reconciled);
        assert!(statement.balances());
        assert_eq!(statement.items_total(), statement.subtotal);
    }

    #[test]
    fn test_fallback_statement_reports_imbalance() {
        let b = booking(3, dec!(50.00), dec!(5.00));
        let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert!(!statement.vehicle_charge_reconciled);
        assert!(!statement.balances());
    }

    proptest! {
        /// For any subtotal whose remainder lands inside the sanity bound,
        /// the displayed line items sum to the displayed subtotal exactly.
        #[test]
        fn reconciled_items_always_sum_to_subtotal(
            days in 1u32..30u32,
            daily_rate_cents in 1000i64..20_000i64,
            extra_cents in 1i64..50_000i64,
            delivery_cents in 0i64..20_000i64,
        ) {
            let daily_rate = Decimal::new(daily_rate_cents, 2);
            let delivery = Decimal::new(delivery_cents, 2);

            // Construct the subtotal as non-vehicle + a positive in-bound
            // vehicle remainder so the reconciled branch is taken.
            let remainder_cents =
                (extra_cents % (daily_rate_cents * i64::from(days))).max(1);
            let non_vehicle_cents = delivery_cents + super::regulatory_cents(days);
            let subtotal = Decimal::new(non_vehicle_cents + remainder_cents, 2);

            let mut b = super::booking(days, daily_rate, subtotal);
            b.delivery_fee = delivery;

            let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
            prop_assert!(statement.vehicle_charge_reconciled);
            prop_assert_eq!(
                statement.items_total().cents(),
                Money::from_decimal(subtotal, Currency::USD).unwrap().cents()
            );
        }
    }
}

mod tax_tests {
    use super::*;
    use proptest::prelude::*;

    /// The worked example: $100.00 subtotal at 7% with $12.00 persisted
    /// tax splits into $7.00 + $5.00.
    #[test]
    fn test_tax_split_worked_example() {
        let mut b = booking(2, dec!(50.00), dec!(100.00));
        b.tax_total = dec!(12.00);
        b.grand_total = dec!(112.00);

        let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
        assert_eq!(statement.tax.primary.cents(), 700);
        assert_eq!(statement.tax.secondary.cents(), 500);
        assert_eq!(statement.tax.total(), statement.tax_total);
    }

    proptest! {
        /// The two components sum to the persisted tax total for every
        /// (subtotal, tax total) pair.
        #[test]
        fn tax_components_sum_exactly(
            subtotal_cents in 0i64..10_000_000i64,
            tax_cents in 0i64..1_000_000i64,
        ) {
            let mut b = super::booking(1, dec!(50.00), Decimal::new(subtotal_cents, 2));
            b.tax_total = Decimal::new(tax_cents, 2);
            b.grand_total = b.subtotal + b.tax_total;

            let statement = build_statement(&b, &ChargeConfig::default()).unwrap();
            prop_assert_eq!(statement.tax.total().cents(), tax_cents);
        }
    }
}
