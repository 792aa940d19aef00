use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated bill-splitting request.
///
/// Produced by [`crate::validate::validate`]; the calculation engine never
/// sees unvalidated field values. Tip percentage and number of people are
/// always present; everything else is optional and treated as zero/empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub bill_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,

    /// Tip percentage in [0, 100].
    pub tip_percentage: Decimal,

    /// Number of participants splitting the bill, in [1, 100].
    pub number_of_people: u32,

    pub title: Option<String>,
    pub restaurant_name: Option<String>,
    pub location: Option<String>,
}

impl Default for CalculationInput {
    /// The empty form: 15% tip for one person, nothing else entered.
    fn default() -> Self {
        Self {
            bill_amount: None,
            tax_amount: None,
            tip_percentage: Decimal::from(15),
            number_of_people: 1,
            title: None,
            restaurant_name: None,
            location: None,
        }
    }
}
