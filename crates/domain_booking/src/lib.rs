//! Booking Domain - Persisted rental records
//!
//! This crate models the booking record as it comes out of storage: per-day
//! rates, ordered add-ons and extra drivers, ad-hoc fees, and the three
//! persisted aggregates (subtotal, tax total, grand total). Aggregates may
//! have been adjusted out-of-band by operational staff; the charge engine
//! downstream reconciles itemized detail against them rather than trusting
//! a naive recomputation.
//!
//! Monetary fields on these types are `Decimal` because that is the storage
//! representation. Conversion to integer cents happens once, in
//! `domain_charges`, and nothing here performs arithmetic on them.

pub mod addon;
pub mod booking;
pub mod driver;
pub mod error;
pub mod party;

pub use addon::BookingAddOn;
pub use booking::{AgeBand, Booking, BookingStatus, ProtectionPlan, VehicleCategory};
pub use driver::ExtraDriver;
pub use error::BookingError;
pub use party::{RentalLocation, RenterProfile, VehicleSummary};
