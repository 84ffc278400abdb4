//! Operational charge summary
//!
//! The internal surface the ops team sees: the same itemized breakdown
//! that goes on the agreement and invoice, rendered without narrative or
//! signature sections. Driving the shared charges section through the
//! same layout engine is what keeps the three surfaces identical.

use chrono::{DateTime, Utc};
use tracing::instrument;

use core_kernel::{BookingId, Rate};
use domain_charges::{build_statement, ChargeConfig, ChargeStatement};
use render_engine::{LayoutContext, PageSpec};

use crate::document::DocumentArtifact;
use crate::error::DocumentError;
use crate::ports::{gather, RentalStore};
use crate::sections::{charges_section, format_timestamp, or_placeholder, rental_details};

/// Builds operational charge summaries
pub struct SummaryBuilder {
    config: ChargeConfig,
    page: PageSpec,
}

impl SummaryBuilder {
    /// Creates a builder with the given charge configuration
    pub fn new(config: ChargeConfig) -> Self {
        Self {
            config,
            page: PageSpec::default(),
        }
    }

    /// Prices the booking and returns the statement without rendering
    ///
    /// Callers that only need numbers (dashboards, reconciliation jobs)
    /// stop here.
    pub async fn statement<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
    ) -> Result<ChargeStatement, DocumentError> {
        let data = gather(store, booking_id).await?;
        Ok(build_statement(&data.booking, &self.config)?)
    }

    /// Renders the summary artifact for a booking
    #[instrument(skip(self, store), fields(booking_id = %booking_id))]
    pub async fn build<S: RentalStore>(
        &self,
        store: &S,
        booking_id: BookingId,
        generated_at: DateTime<Utc>,
    ) -> Result<DocumentArtifact, DocumentError> {
        let data = gather(store, booking_id).await?;
        let statement = build_statement(&data.booking, &self.config)?;

        let mut layout = LayoutContext::new(self.page)?;
        layout.section_heading("Charge Summary");
        layout.key_value_row("Booking Reference", &booking_id.to_string());
        layout.key_value_row(
            "Renter",
            &or_placeholder(data.renter.as_ref().map(|r| r.full_name.clone())),
        );
        rental_details(&mut layout, &data);
        charges_section(
            &mut layout,
            &statement,
            Rate::from_percentage(self.config.primary_tax_percent),
        );
        if !statement.vehicle_charge_reconciled {
            layout.spacer();
            layout.paragraph(
                "Note: the persisted subtotal could not be reconciled against the itemized \
                 charges; the vehicle line shows the naive daily-rate calculation.",
            );
        }

        layout.spacer();
        layout.rule();
        layout.key_value_row("Generated at", &format_timestamp(generated_at));

        Ok(DocumentArtifact {
            file_name: format!("ChargeSummary-{}", booking_id.short()),
            bytes: layout.finish().into_bytes(),
        })
    }
}
