//! Rental agreement builder
//!
//! Produces the signable agreement artifact. A signed agreement renders
//! exclusively from its snapshot: the terms and financial payload frozen
//! at signing time, regardless of what the live booking says now.

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use core_kernel::BookingId;
use domain_charges::{build_statement, ChargeConfig};
use render_engine::{render_legacy, LayoutContext, PageSpec};

use crate::document::{DocumentArtifact, DocumentKind, DocumentSource, RentalDocument};
use crate::error::DocumentError;
use crate::ports::{gather, DocumentContext, RentalStore};
use crate::sections::{charges_section, format_timestamp, or_placeholder, rental_details};

/// Artifact name prefix; the suffix is the booking id fragment
const AGREEMENT_PREFIX: &str = "RentalAgreement";

/// Standard terms presented with every agreement
///
/// Captured verbatim into the snapshot at signing time, so later edits to
/// this list never change an already-signed document.
pub const AGREEMENT_TERMS: &[&str] = &[
    "The renter must hold a valid driving licence for the full rental period.",
    "The vehicle is provided with a full tank and must be returned with a full tank.",
    "Only drivers named on this agreement may operate the vehicle.",
    "The renter is liable for traffic and parking penalties incurred during the rental.",
    "Late returns are charged a full additional day per commenced 24-hour period.",
    "Smoking in the vehicle incurs a detailing charge.",
];

/// Builds rental agreements
pub struct AgreementBuilder {
    config: ChargeConfig,
    page: PageSpec,
}

impl AgreementBuilder {
    /// Creates a builder with the given charge configuration
    pub fn new(config: ChargeConfig) -> Self {
        Self {
            config,
            page: PageSpec::default(),
        }
    }

    /// Overrides the page geometry
    pub fn with_page_spec(mut self, page: PageSpec) -> Self {
        self.page = page;
        self
    }

    /// Renders the agreement artifact for a booking
    ///
    /// `generated_at` only feeds the footer and is excluded from the
    /// determinism guarantee.
    #[instrument(skip(self, store), fields(booking_id = %booking_id))]
    pub async fn build<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
        generated_at: DateTime<Utc>,
    ) -> Result<DocumentArtifact, DocumentError> {
        let data = gather(store, booking_id).await?;
        let stored = self.stored_document(store, booking_id).await;

        let mut layout = LayoutContext::new(self.page)?;

        layout.section_heading(DocumentKind::Agreement.title());
        layout.key_value_row("Agreement Reference", &booking_id.to_string());

        self.renter_section(&mut layout, &data);
        rental_details(&mut layout, &data);
        self.financials(&mut layout, &data, stored.as_ref())?;
        self.terms_and_signature(&mut layout, stored.as_ref());

        layout.spacer();
        layout.rule();
        layout.key_value_row("Generated at", &format_timestamp(generated_at));

        Ok(DocumentArtifact {
            file_name: format!("{}-{}", AGREEMENT_PREFIX, booking_id.short()),
            bytes: layout.finish().into_bytes(),
        })
    }

    /// Signs the agreement: freezes terms and financials and persists
    ///
    /// # Errors
    ///
    /// `AlreadySigned` when the agreement carries a snapshot already;
    /// `NotStructured` when the stored agreement is a legacy blob.
    #[instrument(skip(self, store, signature_image), fields(booking_id = %booking_id))]
    pub async fn sign<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
        signer_name: &str,
        signed_at: DateTime<Utc>,
        countersigned_at: Option<DateTime<Utc>>,
        signature_image: Option<Vec<u8>>,
    ) -> Result<RentalDocument, DocumentError> {
        let data = gather(store, booking_id).await?;

        let mut document = match store.fetch_document(booking_id, DocumentKind::Agreement).await? {
            Some(existing) => existing,
            None => {
                let statement = build_statement(&data.booking, &self.config)?;
                RentalDocument::new_structured(
                    booking_id,
                    DocumentKind::Agreement,
                    statement,
                    signed_at,
                )
            }
        };

        document.capture_snapshot(
            signer_name,
            signed_at,
            countersigned_at,
            AGREEMENT_TERMS.join("\n"),
            signature_image,
        )?;
        store.save_document(document.clone()).await?;
        Ok(document)
    }

    async fn stored_document<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
    ) -> Option<RentalDocument> {
        match store.fetch_document(booking_id, DocumentKind::Agreement).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "stored agreement read failed, rendering from live booking");
                None
            }
        }
    }

    fn renter_section(&self, layout: &mut LayoutContext, data: &DocumentContext) {
        layout.section_heading("Renter");
        layout.key_value_row(
            "Name",
            &or_placeholder(data.renter.as_ref().map(|r| r.full_name.clone())),
        );
        layout.key_value_row(
            "Licence Number",
            &or_placeholder(data.renter.as_ref().map(|r| r.licence_number.clone())),
        );
        layout.key_value_row(
            "Email",
            &or_placeholder(data.renter.as_ref().map(|r| r.email.clone())),
        );
    }

    fn financials(
        &self,
        layout: &mut LayoutContext,
        data: &DocumentContext,
        stored: Option<&RentalDocument>,
    ) -> Result<(), DocumentError> {
        let primary_rate = core_kernel::Rate::from_percentage(self.config.primary_tax_percent);

        match stored {
            Some(document) => {
                if let Some(snapshot) = document.snapshot() {
                    charges_section(layout, &snapshot.financial, primary_rate);
                } else {
                    match &document.source {
                        DocumentSource::Structured { statement } => {
                            charges_section(layout, statement, primary_rate);
                        }
                        DocumentSource::Legacy { content } => {
                            layout.section_heading("Charges");
                            render_legacy(layout, content);
                        }
                    }
                }
            }
            None => {
                let statement = build_statement(&data.booking, &self.config)?;
                charges_section(layout, &statement, primary_rate);
            }
        }
        Ok(())
    }

    fn terms_and_signature(&self, layout: &mut LayoutContext, stored: Option<&RentalDocument>) {
        layout.section_heading("Terms & Conditions");

        match stored.and_then(|d| d.snapshot()) {
            Some(snapshot) => {
                // Signed: replay the exact terms that were signed.
                let terms: Vec<String> =
                    snapshot.terms.lines().map(str::to_string).collect();
                layout.numbered_list(&terms);

                layout.signature_block(
                    Some(&snapshot.signer_name),
                    Some(&format_timestamp(snapshot.signed_at)),
                    snapshot.signature_image.as_deref(),
                );
                if let Some(countersigned_at) = snapshot.countersigned_at {
                    layout.key_value_row("Countersigned", &format_timestamp(countersigned_at));
                }
            }
            None => {
                let terms: Vec<String> =
                    AGREEMENT_TERMS.iter().map(|t| t.to_string()).collect();
                layout.numbered_list(&terms);
                layout.signature_block(None, None, None);
            }
        }
    }
}
