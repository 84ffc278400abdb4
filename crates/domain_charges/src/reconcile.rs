//! Vehicle-charge reconciliation
//!
//! The persisted subtotal may differ from the naive sum of computed
//! categories because staff can adjust the subtotal field directly without
//! an itemized counterpart. The breakdown shown to a customer must still
//! sum to the subtotal shown to that customer, so the vehicle line absorbs
//! the difference: whatever remains after subtracting every other known
//! category is presented as the vehicle charge, provided it passes a
//! sanity bound. Outside the bound the engine degrades to rate times days
//! and flags the record, never failing the render.

use tracing::warn;

use core_kernel::Money;

/// Outcome of resolving the vehicle charge against a persisted subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleCharge {
    /// Amount to present on the vehicle rental line
    pub amount: Money,
    /// True when the remainder was trusted; false when the naive base was
    /// used because the remainder failed the sanity bound
    pub reconciled: bool,
}

/// Resolves the vehicle-rental charge for display
///
/// `bound_multiplier` caps the acceptable remainder at that multiple of
/// the naive base; a remainder of zero or less always fails (it would
/// render a free or negative vehicle line).
pub fn resolve_vehicle_charge(
    persisted_subtotal: Money,
    non_vehicle_total: Money,
    naive_base: Money,
    bound_multiplier: i64,
) -> VehicleCharge {
    let remainder_cents = persisted_subtotal.cents() - non_vehicle_total.cents();
    let bound_cents = naive_base.cents().saturating_mul(bound_multiplier);

    if remainder_cents > 0 && remainder_cents <= bound_cents {
        return VehicleCharge {
            amount: Money::from_cents(remainder_cents, persisted_subtotal.currency()),
            reconciled: true,
        };
    }

    warn!(
        remainder_cents,
        bound_cents,
        naive_base_cents = naive_base.cents(),
        subtotal_cents = persisted_subtotal.cents(),
        "reconciliation remainder outside sanity bound, falling back to naive vehicle charge"
    );
    VehicleCharge {
        amount: naive_base,
        reconciled: false,
    }
}
