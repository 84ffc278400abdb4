//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common scenarios, designed to be consistent
//! and predictable across the suite.

use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::{Currency, LocationId, Money, RenterId, VehicleId};
use domain_booking::{Booking, RentalLocation, RenterProfile, VehicleSummary};

use crate::builders::BookingBuilder;

/// Shorthand for USD amounts in cents
pub fn usd(cents: i64) -> Money {
    Money::from_cents(cents, Currency::USD)
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard pickup timestamp (Jun 1, 2024, 09:00 UTC)
    pub fn pickup() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    /// Standard signing timestamp (Jun 1, 2024, 08:30 UTC)
    pub fn signed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    /// Fixed render timestamp for determinism tests
    pub fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }
}

/// Fixture for booking test data
pub struct BookingFixtures;

impl BookingFixtures {
    /// The reconciliation worked example: $50.00/day for 3 days, $200.00
    /// persisted subtotal, and a $52.98 delivery fee that brings the
    /// non-vehicle total to exactly $60.00 with the regulatory fees,
    /// leaving a $140.00 vehicle line
    pub fn reconciliation_example() -> Booking {
        BookingBuilder::new()
            .with_days(3)
            .with_daily_rate(dec!(50.00))
            .with_delivery_fee(dec!(52.98))
            .with_subtotal(dec!(200.00))
            .with_tax_total(dec!(12.00))
            .with_grand_total(dec!(212.00))
            .build()
    }

    /// A booking whose persisted subtotal was corrupted below the
    /// non-vehicle charges, forcing the naive fallback
    pub fn corrupt_subtotal() -> Booking {
        BookingBuilder::new()
            .with_subtotal(dec!(1.00))
            .with_grand_total(dec!(13.00))
            .build()
    }
}

/// Fixture for joined-record test data
pub struct PartyFixtures;

impl PartyFixtures {
    /// A renter profile with fixed identity fields
    pub fn renter(id: RenterId) -> RenterProfile {
        RenterProfile {
            id,
            full_name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            licence_number: "D1234-56789-01234".to_string(),
        }
    }

    /// A renter profile with generated identity fields, for tests that do
    /// not assert on the rendered output
    pub fn random_renter(id: RenterId) -> RenterProfile {
        RenterProfile {
            id,
            full_name: Name().fake(),
            email: SafeEmail().fake(),
            phone: PhoneNumber().fake(),
            licence_number: format!("D{:04}-{:05}", (100..9999).fake::<u16>(), (0..99999).fake::<u32>()),
        }
    }

    /// A vehicle summary with fixed fields
    pub fn vehicle(id: VehicleId) -> VehicleSummary {
        VehicleSummary {
            id,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            plate: "8ABC123".to_string(),
            category_label: "Sedan".to_string(),
        }
    }

    /// A rental location with fixed fields
    pub fn location(id: LocationId, name: &str) -> RentalLocation {
        RentalLocation {
            id,
            name: name.to_string(),
            address_line: "100 Main St".to_string(),
            city: "Springfield".to_string(),
        }
    }
}
