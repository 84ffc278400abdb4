//! The persisted booking record
//!
//! Core facts are immutable once the booking goes active, with one
//! deliberate exception: operational staff can adjust the persisted
//! `subtotal` directly without creating a matching line item. The
//! reconciliation engine in `domain_charges` absorbs that drift.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, Currency, LocationId, RenterId, VehicleId};

use crate::addon::BookingAddOn;
use crate::driver::ExtraDriver;
use crate::error::BookingError;

/// Vehicle category, the key for protection-plan rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Economy,
    Compact,
    Sedan,
    Suv,
    Van,
    Luxury,
}

impl VehicleCategory {
    /// Human-readable label used on documents
    pub fn label(&self) -> &'static str {
        match self {
            VehicleCategory::Economy => "Economy",
            VehicleCategory::Compact => "Compact",
            VehicleCategory::Sedan => "Sedan",
            VehicleCategory::Suv => "SUV",
            VehicleCategory::Van => "Van",
            VehicleCategory::Luxury => "Luxury",
        }
    }
}

/// Optional daily-rate coverage product selected per booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionPlan {
    Basic,
    Standard,
    Premium,
}

impl ProtectionPlan {
    /// Human-readable label used on documents
    pub fn label(&self) -> &'static str {
        match self {
            ProtectionPlan::Basic => "Basic Protection",
            ProtectionPlan::Standard => "Standard Protection",
            ProtectionPlan::Premium => "Premium Protection",
        }
    }
}

/// Age band for extra-driver daily rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Standard,
    Young,
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

/// A persisted rental booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Renter being charged
    pub renter_id: RenterId,
    /// Assigned vehicle
    pub vehicle_id: VehicleId,
    /// Vehicle category at time of booking
    pub category: VehicleCategory,
    /// Pickup timestamp
    pub pickup_at: DateTime<Utc>,
    /// Scheduled return timestamp
    pub return_at: DateTime<Utc>,
    /// Rental duration in whole days, as persisted
    pub days: u32,
    /// Per-day vehicle rate
    pub daily_rate: Decimal,
    /// Selected protection plan, if any
    pub protection_plan: Option<ProtectionPlan>,
    /// Ordered add-ons with persisted prices
    pub add_ons: Vec<BookingAddOn>,
    /// Extra drivers in registration order
    pub extra_drivers: Vec<ExtraDriver>,
    /// Young-driver surcharge (whole-booking amount)
    pub young_driver_fee: Decimal,
    /// Fee for returning to a different location
    pub different_dropoff_fee: Decimal,
    /// Vehicle delivery fee
    pub delivery_fee: Decimal,
    /// Per-day upgrade fee
    pub daily_upgrade_fee: Decimal,
    /// Pickup location
    pub pickup_location_id: LocationId,
    /// Drop-off location
    pub dropoff_location_id: LocationId,
    /// Booking currency
    pub currency: Currency,
    /// Persisted aggregate: pre-tax subtotal (may be adjusted out-of-band)
    pub subtotal: Decimal,
    /// Persisted aggregate: combined tax total
    pub tax_total: Decimal,
    /// Persisted aggregate: grand total
    pub grand_total: Decimal,
    /// Lifecycle status
    pub status: BookingStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Validates the facts the charge engine depends on
    ///
    /// # Errors
    ///
    /// Returns an error for a zero-day rental or a negative daily rate,
    /// both of which indicate a corrupt record rather than a chargeable
    /// booking.
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.days == 0 {
            return Err(BookingError::InvalidDuration { days: self.days });
        }
        if self.daily_rate.is_sign_negative() {
            return Err(BookingError::validation(format!(
                "negative daily rate: {}",
                self.daily_rate
            )));
        }
        if self.return_at < self.pickup_at {
            return Err(BookingError::validation(
                "return timestamp precedes pickup timestamp",
            ));
        }
        Ok(())
    }

    /// Returns true when pickup and drop-off locations differ
    pub fn is_different_dropoff(&self) -> bool {
        self.pickup_location_id != self.dropoff_location_id
    }
}
