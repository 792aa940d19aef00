use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CalculationInput, CalculationResult};

/// A durable record of one past calculation.
///
/// Created only on a successful submission with a positive bill, and never
/// mutated afterwards. Carries the headline results alongside the input so
/// the history list can be rendered without recomputing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub input: CalculationInput,
    pub total_per_person: Decimal,
    pub total_bill: Decimal,

    /// Round-up flag active when the entry was saved. Replaying the entry
    /// restores this flag instead of the current session flag.
    pub round_up_at_save: bool,
}

impl HistoryEntry {
    pub fn new(
        input: CalculationInput,
        result: &CalculationResult,
        round_up: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            total_per_person: result.total_per_person,
            total_bill: result.total_bill_with_tip,
            input,
            round_up_at_save: round_up,
        }
    }

    /// Display label: title, else restaurant name, else the save date.
    pub fn label(&self) -> String {
        self.input
            .title
            .clone()
            .or_else(|| self.input.restaurant_name.clone())
            .unwrap_or_else(|| format!("Calculation on {}", self.saved_at.format("%Y-%m-%d")))
    }
}
