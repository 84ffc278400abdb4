//! Invoice builder
//!
//! Produces the billing invoice artifact for a booking. A stored invoice
//! document wins over the live booking: an issued snapshot renders its
//! frozen payload, a legacy document replays its freeform text. Only when
//! nothing is stored does the builder price the live booking.

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use core_kernel::BookingId;
use domain_charges::{build_statement, ChargeConfig};
use render_engine::{render_legacy, LayoutContext, PageSpec};

use crate::document::{DocumentArtifact, DocumentKind, DocumentSource, RentalDocument};
use crate::error::DocumentError;
use crate::ports::{gather, DocumentContext, RentalStore};
use crate::sections::{charges_section, format_timestamp, or_placeholder, rental_details};

/// Issuing-party identity recorded in invoice snapshots
const ISSUER: &str = "Accounts Receivable";

/// Narrative captured with an issued invoice
const PAYMENT_NOTE: &str = "Payment is due upon receipt.";

/// Builds billing invoices
pub struct InvoiceBuilder {
    config: ChargeConfig,
    page: PageSpec,
}

impl InvoiceBuilder {
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

    /// The invoice number derived from the booking identity
    pub fn invoice_number(booking_id: BookingId) -> String {
        format!("INV-{}", booking_id.short())
    }

    /// Renders the invoice artifact for a booking
    ///
    /// `generated_at` only feeds the footer; it never enters a monetary
    /// computation, so two renders with the same inputs and timestamp are
    /// byte-identical.
    #[instrument(skip(self, store), fields(booking_id = %booking_id))]
    pub async fn build<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
        generated_at: DateTime<Utc>,
    ) -> Result<DocumentArtifact, DocumentError> {
        let data = gather(store, booking_id).await?;
        let stored = self.stored_document(store, booking_id).await;

        let number = Self::invoice_number(booking_id);
        let mut layout = LayoutContext::new(self.page)?;

        layout.section_heading(DocumentKind::Invoice.title());
        layout.key_value_row("Invoice Number", &number);
        layout.key_value_row("Booking Reference", &booking_id.to_string());

        self.bill_to(&mut layout, &data);
        rental_details(&mut layout, &data);
        self.financials(&mut layout, &data, stored.as_ref())?;

        layout.spacer();
        layout.rule();
        layout.key_value_row("Generated at", &format_timestamp(generated_at));

        Ok(DocumentArtifact {
            file_name: format!("Invoice-{}", number),
            bytes: layout.finish().into_bytes(),
        })
    }

    /// Issues the invoice: freezes the current financial payload and
    /// persists the document
    ///
    /// # Errors
    ///
    /// `AlreadySigned` when an issued invoice already exists for the
    /// booking.
    #[instrument(skip(self, store), fields(booking_id = %booking_id))]
    pub async fn issue<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
        issued_at: DateTime<Utc>,
    ) -> Result<RentalDocument, DocumentError> {
        let data = gather(store, booking_id).await?;

        let mut document = match store.fetch_document(booking_id, DocumentKind::Invoice).await? {
            Some(existing) => existing,
            None => {
                let statement = build_statement(&data.booking, &self.config)?;
                RentalDocument::new_structured(
                    booking_id,
                    DocumentKind::Invoice,
                    statement,
                    issued_at,
                )
            }
        };

        document.capture_snapshot(ISSUER, issued_at, None, PAYMENT_NOTE, None)?;
        store.save_document(document.clone()).await?;
        Ok(document)
    }

    async fn stored_document<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
    ) -> Option<RentalDocument> {
        match store.fetch_document(booking_id, DocumentKind::Invoice).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "stored invoice read failed, rendering from live booking");
                None
            }
        }
    }

    fn bill_to(&self, layout: &mut LayoutContext, data: &DocumentContext) {
        layout.section_heading("Bill To");
        layout.key_value_row(
            "Name",
            &or_placeholder(data.renter.as_ref().map(|r| r.full_name.clone())),
        );
        layout.key_value_row(
            "Email",
            &or_placeholder(data.renter.as_ref().map(|r| r.email.clone())),
        );
        layout.key_value_row(
            "Phone",
            &or_placeholder(data.renter.as_ref().map(|r| r.phone.clone())),
        );
    }

    /// Renders the financial body from the stored document when one
    /// exists, otherwise from the live booking
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
                    layout.spacer();
                    layout.key_value_row("Issued by", &snapshot.signer_name);
                    layout.key_value_row("Issued at", &format_timestamp(snapshot.signed_at));
                    layout.paragraph(&snapshot.terms);
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
}
