//! The document model
//!
//! A `RentalDocument` is the persisted form of an agreement or invoice.
//! Newer documents carry a structured charge statement; documents from
//! before the structured schema carry one formatted text blob. The two
//! paths are a tagged variant dispatched once at render time, not probed
//! repeatedly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, DocumentId};
use domain_charges::ChargeStatement;

use crate::error::DocumentError;
use crate::snapshot::DocumentSnapshot;

/// Document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Agreement,
    Invoice,
}

impl DocumentKind {
    /// Title rendered at the top of the document
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Agreement => "Vehicle Rental Agreement",
            DocumentKind::Invoice => "Rental Invoice",
        }
    }
}

/// Financial payload of a persisted document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum DocumentSource {
    /// Structured line items and totals
    Structured { statement: ChargeStatement },
    /// Pre-schema formatted text blob
    Legacy { content: String },
}

/// A persisted agreement or invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalDocument {
    /// Unique identifier
    pub id: DocumentId,
    /// Booking this document belongs to
    pub booking_id: BookingId,
    /// Agreement or invoice
    pub kind: DocumentKind,
    /// Structured or legacy payload
    pub source: DocumentSource,
    /// Write-once snapshot; present once signed or issued
    snapshot: Option<DocumentSnapshot>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl RentalDocument {
    /// Creates an unsigned document with a structured payload
    pub fn new_structured(
        booking_id: BookingId,
        kind: DocumentKind,
        statement: ChargeStatement,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            booking_id,
            kind,
            source: DocumentSource::Structured { statement },
            snapshot: None,
            created_at,
        }
    }

    /// Creates an unsigned document wrapping legacy freeform content
    pub fn new_legacy(
        booking_id: BookingId,
        kind: DocumentKind,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            booking_id,
            kind,
            source: DocumentSource::Legacy { content: content.into() },
            snapshot: None,
            created_at,
        }
    }

    /// The snapshot, once one has been captured
    pub fn snapshot(&self) -> Option<&DocumentSnapshot> {
        self.snapshot.as_ref()
    }

    /// True once signed or issued
    pub fn is_signed(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Captures the write-once snapshot
    ///
    /// # Errors
    ///
    /// `AlreadySigned` if a snapshot exists; `NotStructured` if the
    /// document carries legacy content, which has no financial payload to
    /// freeze.
    pub fn capture_snapshot(
        &mut self,
        signer_name: impl Into<String>,
        signed_at: DateTime<Utc>,
        countersigned_at: Option<DateTime<Utc>>,
        terms: impl Into<String>,
        signature_image: Option<Vec<u8>>,
    ) -> Result<&DocumentSnapshot, DocumentError> {
        if self.snapshot.is_some() {
            return Err(DocumentError::AlreadySigned);
        }
        let statement = match &self.source {
            DocumentSource::Structured { statement } => statement.clone(),
            DocumentSource::Legacy { .. } => {
                return Err(DocumentError::NotStructured(self.id.to_string()));
            }
        };
        Ok(self.snapshot.insert(DocumentSnapshot {
            signer_name: signer_name.into(),
            signed_at,
            countersigned_at,
            terms: terms.into(),
            financial: statement,
            signature_image,
        }))
    }
}

/// A named, downloadable artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    /// Download name, e.g. `Invoice-INV-1FA3B9C0`
    pub file_name: String,
    /// Fully rendered document bytes
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use core_kernel::{Currency, Money};
    use domain_charges::{ChargeLineItem, TaxBreakdown};

    fn statement() -> ChargeStatement {
        let usd = |cents| Money::from_cents(cents, Currency::USD);
        ChargeStatement {
            line_items: vec![ChargeLineItem {
                description: "Daily Rate: $50.00 × 3 days".to_string(),
                amount: usd(15000),
                quantity: None,
            }],
            tax: TaxBreakdown { primary: usd(700), secondary: usd(500) },
            subtotal: usd(15000),
            tax_total: usd(1200),
            grand_total: usd(16200),
            vehicle_charge_reconciled: true,
        }
    }

    #[test]
    fn test_snapshot_is_write_once() {
        let signed_at = Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap();
        let mut doc = RentalDocument::new_structured(
            BookingId::new(),
            DocumentKind::Agreement,
            statement(),
            signed_at,
        );

        assert!(!doc.is_signed());
        doc.capture_snapshot("Jane Doe", signed_at, None, "terms", None)
            .unwrap();
        assert!(doc.is_signed());

        let again = doc.capture_snapshot("Someone Else", signed_at, None, "terms", None);
        assert!(matches!(again, Err(DocumentError::AlreadySigned)));
        assert_eq!(doc.snapshot().unwrap().signer_name, "Jane Doe");
    }

    #[test]
    fn test_persisted_document_round_trips_with_snapshot() {
        let at = Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap();
        let mut doc = RentalDocument::new_structured(
            BookingId::new(),
            DocumentKind::Invoice,
            statement(),
            at,
        );
        doc.capture_snapshot("Accounts Receivable", at, None, "terms", None)
            .unwrap();

        let json = serde_json::to_string(&doc).unwrap();
        let back: RentalDocument = serde_json::from_str(&json).unwrap();
        assert!(back.is_signed());
        assert_eq!(back.snapshot().unwrap().signer_name, "Accounts Receivable");
        assert_eq!(
            back.snapshot().unwrap().financial.grand_total,
            doc.snapshot().unwrap().financial.grand_total
        );
    }

    #[test]
    fn test_legacy_documents_cannot_be_signed() {
        let at = Utc.with_ymd_and_hms(2024, 6, 4, 10, 0, 0).unwrap();
        let mut doc = RentalDocument::new_legacy(
            BookingId::new(),
            DocumentKind::Agreement,
            "=== Terms ===",
            at,
        );
        let result = doc.capture_snapshot("Jane Doe", at, None, "terms", None);
        assert!(matches!(result, Err(DocumentError::NotStructured(_))));
    }
}
