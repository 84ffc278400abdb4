//! Document Builder Tests
//!
//! End-to-end tests for the invoice and agreement adapters: joined-record
//! gathering, charge pipeline, rendering, snapshots, and the legacy
//! fallback path.
//!
//! # Test Organization
//!
//! - `invoice_tests` - artifact naming, determinism, degraded joins, issuing
//! - `agreement_tests` - signing, snapshot immutability, legacy content
//! - `statement_property_tests` - cross-crate pricing properties

use chrono::Duration;
use rust_decimal_macros::dec;

use core_kernel::BookingId;
use domain_booking::Booking;
use domain_charges::ChargeConfig;
use domain_documents::{
    AgreementBuilder, DocumentError, DocumentKind, InMemoryRentalStore, InvoiceBuilder,
    RentalDocument, RentalStore,
};
use test_utils::{init_tracing, BookingFixtures, PartyFixtures, TemporalFixtures};

/// Seeds a store with the booking and all of its joined records
async fn seeded_store(booking: &Booking) -> InMemoryRentalStore {
    let store = InMemoryRentalStore::new();
    store
        .insert_renter(PartyFixtures::renter(booking.renter_id))
        .await;
    store
        .insert_vehicle(PartyFixtures::vehicle(booking.vehicle_id))
        .await;
    store
        .insert_location(PartyFixtures::location(
            booking.pickup_location_id,
            "Downtown Branch",
        ))
        .await;
    store
        .insert_location(PartyFixtures::location(
            booking.dropoff_location_id,
            "Airport Branch",
        ))
        .await;
    store.insert_booking(booking.clone()).await;
    store
}

fn artifact_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).expect("artifacts are UTF-8")
}

mod invoice_tests {
    use super::*;

    #[tokio::test]
    async fn test_invoice_renders_reconciled_breakdown() {
        init_tracing();
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = InvoiceBuilder::new(ChargeConfig::default());

        let artifact = builder
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();

        assert_eq!(
            artifact.file_name,
            format!("Invoice-INV-{}", booking.id.short())
        );
        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("RENTAL INVOICE"));
        assert!(text.contains("Daily Rate: $50.00 × 3 days"));
        // The reconciled vehicle line, not rate times days.
        assert!(text.contains("$140.00"));
        assert!(text.contains("SUBTOTAL"));
        assert!(text.contains("$200.00"));
        assert!(text.contains("$212.00 USD"));
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Downtown Branch, Springfield"));
    }

    #[tokio::test]
    async fn test_identical_inputs_render_identical_bytes() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = InvoiceBuilder::new(ChargeConfig::default());
        let at = TemporalFixtures::generated_at();

        let first = builder.build(&store, booking.id, at).await.unwrap();
        let second = builder.build(&store, booking.id, at).await.unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[tokio::test]
    async fn test_missing_booking_is_fatal() {
        let store = InMemoryRentalStore::new();
        let builder = InvoiceBuilder::new(ChargeConfig::default());

        let result = builder
            .build(&store, BookingId::new(), TemporalFixtures::generated_at())
            .await;
        assert!(matches!(result, Err(DocumentError::BookingNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_secondary_records_degrade_to_placeholders() {
        init_tracing();
        let booking = BookingFixtures::reconciliation_example();
        let store = InMemoryRentalStore::new();
        store.insert_booking(booking.clone()).await;

        let artifact = InvoiceBuilder::new(ChargeConfig::default())
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();

        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("N/A"));
        // Degraded, but the breakdown still rendered.
        assert!(text.contains("$140.00"));
    }

    #[tokio::test]
    async fn test_corrupt_subtotal_still_renders_with_naive_vehicle_line() {
        init_tracing();
        let booking = BookingFixtures::corrupt_subtotal();
        let store = seeded_store(&booking).await;

        let artifact = InvoiceBuilder::new(ChargeConfig::default())
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();

        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("Daily Rate: $50.00 × 3 days"));
        assert!(text.contains("$150.00"));
    }

    #[tokio::test]
    async fn test_issue_is_write_once() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = InvoiceBuilder::new(ChargeConfig::default());
        let at = TemporalFixtures::signed_at();

        let document = builder.issue(&store, booking.id, at).await.unwrap();
        assert!(document.is_signed());

        let again = builder.issue(&store, booking.id, at).await;
        assert!(matches!(again, Err(DocumentError::AlreadySigned)));
    }
}

mod agreement_tests {
    use super::*;

    #[tokio::test]
    async fn test_unsigned_agreement_shows_blank_signature_lines() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;

        let artifact = AgreementBuilder::new(ChargeConfig::default())
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();

        assert_eq!(
            artifact.file_name,
            format!("RentalAgreement-{}", booking.id.short())
        );
        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("VEHICLE RENTAL AGREEMENT"));
        assert!(text.contains("TERMS & CONDITIONS"));
        assert!(text.contains("X________"));
        assert!(text.contains("Renter Signature"));
    }

    #[tokio::test]
    async fn test_signed_agreement_renders_signature_identity() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = AgreementBuilder::new(ChargeConfig::default());

        builder
            .sign(
                &store,
                booking.id,
                "Jane Doe",
                TemporalFixtures::signed_at(),
                Some(TemporalFixtures::signed_at() + Duration::hours(2)),
                Some(vec![0x89, 0x50, 0x4e, 0x47]),
            )
            .await
            .unwrap();

        let artifact = builder
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();
        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("Signed by: Jane Doe"));
        assert!(text.contains("Signed at: 2024-06-01 08:30 UTC"));
        assert!(text.contains("[signature image on file, 4 bytes]"));
        assert!(text.contains("Countersigned:"));
    }

    #[tokio::test]
    async fn test_snapshot_survives_booking_mutation() {
        init_tracing();
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = AgreementBuilder::new(ChargeConfig::default());
        let at = TemporalFixtures::generated_at();

        builder
            .sign(
                &store,
                booking.id,
                "Jane Doe",
                TemporalFixtures::signed_at(),
                None,
                None,
            )
            .await
            .unwrap();
        let before = builder.build(&store, booking.id, at).await.unwrap();

        // Mutate the live booking after signing.
        let mut mutated = booking.clone();
        mutated.daily_rate = dec!(95.00);
        mutated.subtotal = dec!(400.00);
        mutated.grand_total = dec!(428.00);
        store.insert_booking(mutated).await;

        let after = builder.build(&store, booking.id, at).await.unwrap();
        assert_eq!(before.bytes, after.bytes);

        let text = artifact_text(&after.bytes);
        assert!(text.contains("$212.00 USD"));
        assert!(!text.contains("$428.00"));
    }

    #[tokio::test]
    async fn test_signing_twice_is_rejected() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = AgreementBuilder::new(ChargeConfig::default());

        builder
            .sign(&store, booking.id, "Jane Doe", TemporalFixtures::signed_at(), None, None)
            .await
            .unwrap();
        let again = builder
            .sign(&store, booking.id, "Mal Lory", TemporalFixtures::signed_at(), None, None)
            .await;
        assert!(matches!(again, Err(DocumentError::AlreadySigned)));
    }

    #[tokio::test]
    async fn test_legacy_document_renders_through_fallback() {
        init_tracing();
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;

        let legacy_content = "\
=== Charge Summary ===
Vehicle: Sedan, 3 days
Daily Rate: $50.00
----
1. Charges reviewed with renter
2. Fuel policy explained
[x] Keys returned
bad\u{0}line that must be skipped
Remaining balance payable on return.";
        store
            .save_document(RentalDocument::new_legacy(
                booking.id,
                DocumentKind::Agreement,
                legacy_content,
                TemporalFixtures::signed_at(),
            ))
            .await
            .unwrap();

        let artifact = AgreementBuilder::new(ChargeConfig::default())
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();

        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("CHARGE SUMMARY"));
        assert!(text.contains("Daily Rate:"));
        assert!(text.contains("1. Charges reviewed with renter"));
        assert!(text.contains("[x] Keys returned"));
        assert!(text.contains("Remaining balance payable on return."));
        assert!(!text.contains("bad"));
    }
}

mod summary_tests {
    use super::*;
    use domain_documents::SummaryBuilder;

    #[tokio::test]
    async fn test_summary_artifact_and_statement_access() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let builder = SummaryBuilder::new(ChargeConfig::default());

        let statement = builder.statement(&store, booking.id).await.unwrap();
        test_utils::assert_statement_balances(&statement);
        test_utils::assert_tax_exact(&statement);

        let artifact = builder
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();
        assert_eq!(
            artifact.file_name,
            format!("ChargeSummary-{}", booking.id.short())
        );
        assert!(artifact_text(&artifact.bytes).contains("CHARGE SUMMARY"));
    }

    #[tokio::test]
    async fn test_summary_flags_unreconciled_subtotal() {
        init_tracing();
        let booking = BookingFixtures::corrupt_subtotal();
        let store = seeded_store(&booking).await;

        let artifact = SummaryBuilder::new(ChargeConfig::default())
            .build(&store, booking.id, TemporalFixtures::generated_at())
            .await
            .unwrap();
        let text = artifact_text(&artifact.bytes);
        assert!(text.contains("could not be reconciled"));
    }

    /// The same breakdown must render identically on all three surfaces.
    #[tokio::test]
    async fn test_charge_rows_match_across_surfaces() {
        let booking = BookingFixtures::reconciliation_example();
        let store = seeded_store(&booking).await;
        let config = ChargeConfig::default;
        let at = TemporalFixtures::generated_at();

        let summary = SummaryBuilder::new(config())
            .build(&store, booking.id, at)
            .await
            .unwrap();
        let invoice = InvoiceBuilder::new(config())
            .build(&store, booking.id, at)
            .await
            .unwrap();
        let agreement = AgreementBuilder::new(config())
            .build(&store, booking.id, at)
            .await
            .unwrap();

        let charge_row = |bytes: &[u8], needle: &str| -> String {
            artifact_text(bytes)
                .lines()
                .find(|l| l.contains(needle))
                .map(|l| l.trim().to_string())
                .unwrap_or_else(|| panic!("no row containing {:?}", needle))
        };

        for needle in ["Daily Rate:", "Delivery Fee", "SUBTOTAL", "GRAND TOTAL"] {
            let row = charge_row(&summary.bytes, needle);
            assert_eq!(row, charge_row(&invoice.bytes, needle));
            assert_eq!(row, charge_row(&agreement.bytes, needle));
        }
    }
}

mod statement_property_tests {
    use domain_charges::{build_statement, ChargeConfig};
    use proptest::prelude::*;
    use test_utils::{assert_tax_exact, booking_strategy};

    proptest! {
        /// Pricing any chargeable booking succeeds, the tax components
        /// reproduce the persisted total exactly, and a reconciled
        /// statement balances against its subtotal.
        #[test]
        fn pricing_random_bookings_upholds_invariants(booking in booking_strategy()) {
            let statement = build_statement(&booking, &ChargeConfig::default()).unwrap();
            assert_tax_exact(&statement);
            if statement.vehicle_charge_reconciled {
                prop_assert_eq!(
                    statement.items_total().cents(),
                    statement.subtotal.cents()
                );
            }
        }
    }
}
