//! Charge domain errors

use thiserror::Error;

use core_kernel::MoneyError;
use domain_booking::BookingError;

/// Errors that can occur while computing charges
#[derive(Debug, Error)]
pub enum ChargeError {
    /// Monetary conversion or arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The booking record is not chargeable
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),
}
