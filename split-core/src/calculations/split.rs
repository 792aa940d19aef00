//! The bill-splitting engine.
//!
//! Rounding is applied once, at the per-person level, and then propagated
//! backward: the total bill is re-derived from the (possibly rounded)
//! per-person share, and the tip absorbs the difference. This guarantees
//! `total_per_person × number_of_people == total_bill_with_tip` exactly,
//! at the cost of the reported tip diverging from the nominal percentage
//! when rounding up is active.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use split_core::models::CalculationInput;
//! use split_core::calculations::compute;
//!
//! let input = CalculationInput {
//!     bill_amount: Some(dec!(100.00)),
//!     tax_amount: None,
//!     tip_percentage: dec!(20),
//!     number_of_people: 4,
//!     ..CalculationInput::default()
//! };
//!
//! let result = compute(&input, false);
//!
//! assert_eq!(result.total_tip_amount, dec!(20.00));
//! assert_eq!(result.total_bill_with_tip, dec!(120.00));
//! assert_eq!(result.tip_per_person, dec!(5.00));
//! assert_eq!(result.total_per_person, dec!(30.00));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{ceil_whole, clamp_non_negative};
use crate::models::{CalculationInput, CalculationResult};

/// Computes tip, totals, and per-person shares for a validated input.
///
/// Never fails. A missing or non-positive bill models "no bill entered yet":
/// the result is all zero except `total_bill_with_tip`, which carries the
/// tax amount through unchanged.
pub fn compute(
    input: &CalculationInput,
    round_up: bool,
) -> CalculationResult {
    let bill = input.bill_amount.unwrap_or(Decimal::ZERO);
    let tax = input.tax_amount.unwrap_or(Decimal::ZERO);

    if bill <= Decimal::ZERO {
        return CalculationResult {
            total_bill_with_tip: clamp_non_negative(tax),
            ..CalculationResult::default()
        };
    }

    // Validation guarantees 1..=100; the max(1) keeps division safe anyway.
    let people = Decimal::from(input.number_of_people.max(1));

    let base_tip = bill * input.tip_percentage / Decimal::ONE_HUNDRED;
    let subtotal = bill + tax;
    let raw_per_person = (subtotal + base_tip) / people;

    let per_person = if round_up {
        ceil_whole(raw_per_person)
    } else {
        raw_per_person
    };

    // Re-derive the total from the per-person share so the split is exact;
    // the rounding remainder lands in the tip, not the bill or tax.
    let total_bill_with_tip = per_person * people;
    let tip_amount = total_bill_with_tip - subtotal;
    let tip_per_person = tip_amount / people;

    CalculationResult {
        total_tip_amount: clamp_non_negative(tip_amount),
        total_bill_with_tip: clamp_non_negative(total_bill_with_tip),
        tip_per_person: clamp_non_negative(tip_per_person),
        total_per_person: clamp_non_negative(per_person),
    }
}
