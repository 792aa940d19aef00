use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of one run of the calculation engine.
///
/// Derived entirely from a [`super::CalculationInput`] plus the round-up
/// flag; never persisted on its own. All amounts are non-negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Full tip, including any remainder absorbed by rounding up.
    pub total_tip_amount: Decimal,

    /// Bill including tax and tip, re-derived from the per-person share.
    pub total_bill_with_tip: Decimal,

    pub tip_per_person: Decimal,
    pub total_per_person: Decimal,
}
