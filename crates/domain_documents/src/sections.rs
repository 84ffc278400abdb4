//! Layout sections shared by the invoice and agreement builders
//!
//! Both documents show the same rental details and the same charge table;
//! only the surrounding narrative differs. Keeping these here guarantees
//! the breakdown renders identically across surfaces.

use chrono::{DateTime, Utc};

use core_kernel::Rate;
use domain_charges::ChargeStatement;
use render_engine::LayoutContext;

use crate::ports::DocumentContext;

/// Placeholder for a joined record that failed to load
pub(crate) const PLACEHOLDER: &str = "N/A";

pub(crate) fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Two-column rental facts
pub(crate) fn rental_details(layout: &mut LayoutContext, data: &DocumentContext) {
    let booking = &data.booking;

    layout.section_heading("Rental Details");
    layout.key_value_pair(
        "Vehicle",
        &or_placeholder(data.vehicle.as_ref().map(|v| v.description())),
    );
    layout.key_value_pair("Category", booking.category.label());
    layout.key_value_pair("Pickup", &format_timestamp(booking.pickup_at));
    layout.key_value_pair("Return", &format_timestamp(booking.return_at));
    layout.key_value_pair("Duration", &format!("{} days", booking.days));
    layout.key_value_pair(
        "Pickup Location",
        &or_placeholder(data.pickup.as_ref().map(|l| l.description())),
    );
    layout.key_value_pair(
        "Drop-off Location",
        &or_placeholder(data.dropoff.as_ref().map(|l| l.description())),
    );
}

/// The itemized charge table with tax rows and banded totals
///
/// Taxes and totals are appended here by the caller's statement, never as
/// line items. The grand-total row carries the explicit currency code.
pub(crate) fn charges_section(
    layout: &mut LayoutContext,
    statement: &ChargeStatement,
    primary_rate: Rate,
) {
    layout.section_heading("Charges");
    for item in &statement.line_items {
        layout.table_row(&item.description, &item.amount.to_string(), false);
    }
    layout.table_row("Subtotal", &statement.subtotal.to_string(), true);
    layout.table_row(
        &format!("Sales Tax ({})", primary_rate),
        &statement.tax.primary.to_string(),
        false,
    );
    layout.table_row(
        "Other Taxes & Surcharges",
        &statement.tax.secondary.to_string(),
        false,
    );
    layout.table_row(
        "Grand Total",
        &statement.grand_total.format_with_code(),
        true,
    );
}
