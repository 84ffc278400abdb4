//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than bare equality checks.

use core_kernel::Money;
use domain_charges::ChargeStatement;

/// Asserts a Money value holds exactly the expected cents
pub fn assert_cents(actual: Money, expected_cents: i64) {
    assert_eq!(
        actual.cents(),
        expected_cents,
        "expected {} cents, got {} ({})",
        expected_cents,
        actual.cents(),
        actual
    );
}

/// Asserts that a statement's displayed items sum to its displayed
/// subtotal
///
/// Only valid for statements whose vehicle charge reconciled; a fallback
/// statement is allowed to differ and flagged as such.
pub fn assert_statement_balances(statement: &ChargeStatement) {
    assert!(
        statement.vehicle_charge_reconciled,
        "statement fell back to the naive vehicle charge; balance is not guaranteed"
    );
    assert_eq!(
        statement.items_total().cents(),
        statement.subtotal.cents(),
        "line items sum to {} but subtotal is {}",
        statement.items_total(),
        statement.subtotal
    );
}

/// Asserts the tax components sum exactly to the persisted tax total
pub fn assert_tax_exact(statement: &ChargeStatement) {
    assert_eq!(
        statement.tax.total().cents(),
        statement.tax_total.cents(),
        "tax components {} + {} do not reproduce the persisted total {}",
        statement.tax.primary,
        statement.tax.secondary,
        statement.tax_total
    );
}
