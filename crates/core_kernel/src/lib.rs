//! Core Kernel - Foundational types for the rental platform
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money held as integer minor units with precise conversions
//! - Strongly-typed identifiers
//! - The port error taxonomy shared by all adapters

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{AddOnId, BookingId, DocumentId, DriverId, LocationId, RenterId, VehicleId};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{DomainPort, PortError};
