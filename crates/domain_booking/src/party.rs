//! Joined records referenced by a booking
//!
//! These come from other services at render time. Every one of them is
//! optional to the document pipeline: a failed read degrades to a
//! placeholder, never an aborted render.

use serde::{Deserialize, Serialize};

use core_kernel::{LocationId, RenterId, VehicleId};

/// Customer profile joined onto documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenterProfile {
    pub id: RenterId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub licence_number: String,
}

/// Vehicle facts joined onto documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub plate: String,
    pub category_label: String,
}

impl VehicleSummary {
    /// Single-line description for key-value rows
    pub fn description(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.plate)
    }
}

/// A pickup or drop-off location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalLocation {
    pub id: LocationId,
    pub name: String,
    pub address_line: String,
    pub city: String,
}

impl RentalLocation {
    /// Single-line description for key-value rows
    pub fn description(&self) -> String {
        format!("{}, {}", self.name, self.city)
    }
}
