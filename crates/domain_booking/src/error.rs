//! Booking domain errors

use thiserror::Error;

/// Errors that can occur in the booking domain
#[derive(Debug, Error)]
pub enum BookingError {
    /// Rental duration is not chargeable
    #[error("Invalid rental duration: {days} days")]
    InvalidDuration { days: u32 },

    /// Record fails a basic sanity check
    #[error("Validation error: {0}")]
    Validation(String),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }
}
