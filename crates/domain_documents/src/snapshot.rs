//! Write-once document snapshots
//!
//! Signing an agreement or issuing an invoice freezes the exact terms and
//! financial payload in effect at that moment. From then on the snapshot
//! is the source of truth for the artifact: later changes to the live
//! booking must never alter what was signed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_charges::ChargeStatement;

/// The immutable payload captured when a document is signed or issued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Who signed (or which party issued)
    pub signer_name: String,
    /// When the signature was captured
    pub signed_at: DateTime<Utc>,
    /// When the confirming party countersigned, if they have
    pub countersigned_at: Option<DateTime<Utc>>,
    /// The exact terms text presented at signing time
    pub terms: String,
    /// The exact financial payload presented at signing time
    pub financial: ChargeStatement,
    /// Captured signature image, if one was drawn
    pub signature_image: Option<Vec<u8>>,
}
