//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests specify only the fields they care about.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{BookingId, Currency, LocationId, RenterId, VehicleId};
use domain_booking::{
    AgeBand, Booking, BookingAddOn, BookingStatus, ExtraDriver, ProtectionPlan, VehicleCategory,
};

/// Builder for test bookings
///
/// Defaults describe a plain three-day sedan rental at $50.00/day with a
/// $200.00 persisted subtotal, which reconciles cleanly against the
/// regulatory fees.
pub struct BookingBuilder {
    id: BookingId,
    renter_id: RenterId,
    vehicle_id: VehicleId,
    category: VehicleCategory,
    pickup_at: DateTime<Utc>,
    days: u32,
    daily_rate: Decimal,
    protection_plan: Option<ProtectionPlan>,
    add_ons: Vec<BookingAddOn>,
    extra_drivers: Vec<ExtraDriver>,
    young_driver_fee: Decimal,
    different_dropoff_fee: Decimal,
    delivery_fee: Decimal,
    daily_upgrade_fee: Decimal,
    pickup_location_id: LocationId,
    dropoff_location_id: LocationId,
    currency: Currency,
    subtotal: Decimal,
    tax_total: Decimal,
    grand_total: Decimal,
    status: BookingStatus,
}

impl Default for BookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            id: BookingId::new(),
            renter_id: RenterId::new(),
            vehicle_id: VehicleId::new(),
            category: VehicleCategory::Sedan,
            pickup_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            days: 3,
            daily_rate: dec!(50.00),
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
            subtotal: dec!(200.00),
            tax_total: dec!(12.00),
            grand_total: dec!(212.00),
            status: BookingStatus::Active,
        }
    }

    pub fn with_id(mut self, id: BookingId) -> Self {
        self.id = id;
        self
    }

    pub fn with_renter_id(mut self, id: RenterId) -> Self {
        self.renter_id = id;
        self
    }

    pub fn with_vehicle_id(mut self, id: VehicleId) -> Self {
        self.vehicle_id = id;
        self
    }

    pub fn with_category(mut self, category: VehicleCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_pickup_at(mut self, at: DateTime<Utc>) -> Self {
        self.pickup_at = at;
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_daily_rate(mut self, rate: Decimal) -> Self {
        self.daily_rate = rate;
        self
    }

    pub fn with_protection(mut self, plan: ProtectionPlan) -> Self {
        self.protection_plan = Some(plan);
        self
    }

    pub fn add_add_on(mut self, add_on: BookingAddOn) -> Self {
        self.add_ons.push(add_on);
        self
    }

    pub fn add_driver(mut self, name: impl Into<String>, age_band: AgeBand) -> Self {
        self.extra_drivers.push(ExtraDriver::new(name, age_band));
        self
    }

    pub fn with_young_driver_fee(mut self, fee: Decimal) -> Self {
        self.young_driver_fee = fee;
        self
    }

    pub fn with_dropoff_fee(mut self, fee: Decimal) -> Self {
        self.different_dropoff_fee = fee;
        self
    }

    pub fn with_delivery_fee(mut self, fee: Decimal) -> Self {
        self.delivery_fee = fee;
        self
    }

    pub fn with_daily_upgrade_fee(mut self, fee: Decimal) -> Self {
        self.daily_upgrade_fee = fee;
        self
    }

    pub fn with_locations(mut self, pickup: LocationId, dropoff: LocationId) -> Self {
        self.pickup_location_id = pickup;
        self.dropoff_location_id = dropoff;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_subtotal(mut self, subtotal: Decimal) -> Self {
        self.subtotal = subtotal;
        self
    }

    pub fn with_tax_total(mut self, tax_total: Decimal) -> Self {
        self.tax_total = tax_total;
        self
    }

    pub fn with_grand_total(mut self, grand_total: Decimal) -> Self {
        self.grand_total = grand_total;
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the booking
    pub fn build(self) -> Booking {
        Booking {
            id: self.id,
            renter_id: self.renter_id,
            vehicle_id: self.vehicle_id,
            category: self.category,
            pickup_at: self.pickup_at,
            return_at: self.pickup_at + Duration::days(i64::from(self.days)),
            days: self.days,
            daily_rate: self.daily_rate,
            protection_plan: self.protection_plan,
            add_ons: self.add_ons,
            extra_drivers: self.extra_drivers,
            young_driver_fee: self.young_driver_fee,
            different_dropoff_fee: self.different_dropoff_fee,
            delivery_fee: self.delivery_fee,
            daily_upgrade_fee: self.daily_upgrade_fee,
            pickup_location_id: self.pickup_location_id,
            dropoff_location_id: self.dropoff_location_id,
            currency: self.currency,
            subtotal: self.subtotal,
            tax_total: self.tax_total,
            grand_total: self.grand_total,
            status: self.status,
            created_at: self.pickup_at - Duration::days(7),
            updated_at: self.pickup_at - Duration::days(7),
        }
    }
}
