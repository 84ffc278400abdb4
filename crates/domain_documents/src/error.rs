//! Document domain errors
//!
//! Only a missing primary booking record is fatal to a render request.
//! Secondary join failures degrade to placeholders before they ever reach
//! this type, and data-inconsistency conditions are absorbed inside the
//! charge engine.

use thiserror::Error;

use core_kernel::{MoneyError, PortError};
use domain_charges::ChargeError;
use render_engine::RenderError;

/// Errors that can occur while building documents
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The primary booking record does not exist
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// The store failed for a reason other than a missing secondary record
    #[error("Store error: {0}")]
    Store(#[from] PortError),

    /// Charge computation failed
    #[error("Charge error: {0}")]
    Charge(#[from] ChargeError),

    /// Render setup failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Monetary conversion failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The document already carries a snapshot; it is write-once
    #[error("Document is already signed")]
    AlreadySigned,

    /// Signing requires a structured financial payload
    #[error("Document has no structured payload: {0}")]
    NotStructured(String),
}
