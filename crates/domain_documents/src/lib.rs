//! Document Domain - Agreements and invoices
//!
//! The output adapters of the charge pipeline. Each builder gathers the
//! booking and its joined records (fanned out concurrently, degraded to
//! placeholders on secondary failure), prices the booking through
//! `domain_charges`, and drives the `render_engine` layout operations to
//! a named artifact.
//!
//! Signing or issuing captures a write-once [`DocumentSnapshot`]; from
//! then on the snapshot, not the live booking, is what renders.

pub mod agreement;
pub mod document;
pub mod error;
pub mod invoice;
pub mod ports;
mod sections;
pub mod snapshot;
pub mod summary;

pub use agreement::{AgreementBuilder, AGREEMENT_TERMS};
pub use document::{DocumentArtifact, DocumentKind, DocumentSource, RentalDocument};
pub use error::DocumentError;
pub use invoice::InvoiceBuilder;
pub use ports::{gather, DocumentContext, InMemoryRentalStore, RentalStore};
pub use snapshot::DocumentSnapshot;
pub use summary::SummaryBuilder;
