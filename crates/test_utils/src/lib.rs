//! Test Utilities Crate
//!
//! Shared test infrastructure for the rental platform test suite.
//!
//! # Modules
//!
//! - `builders`: Builder patterns for test data construction
//! - `fixtures`: Pre-built test data for common scenarios
//! - `generators`: Property-based test data generators
//! - `assertions`: Custom assertion helpers for domain types

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;

use once_cell::sync::OnceCell;

/// Initializes test tracing once per process
///
/// Honors `RUST_LOG`; reconciliation warnings become visible when tests
/// run with logging enabled.
pub fn init_tracing() {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
