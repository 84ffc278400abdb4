//! Booking add-ons
//!
//! An add-on's price is persisted at selection time for the whole booking
//! and quantity. It is summed as stored when charges are computed; the
//! charge engine never recomputes it from a rate table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::AddOnId;

/// An add-on attached to a booking (GPS unit, child seat, roof rack, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAddOn {
    /// Unique identifier
    pub id: AddOnId,
    /// Display name
    pub name: String,
    /// Persisted price covering the full quantity and rental period
    pub price: Decimal,
    /// Number of units
    pub quantity: u32,
}

impl BookingAddOn {
    /// Creates a single-unit add-on
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: AddOnId::new(),
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}
