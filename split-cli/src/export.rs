//! Share and export surfaces.
//!
//! Both require a performed calculation with a positive per-person total;
//! otherwise the action is rejected whole, with no partial output.

use rust_decimal::Decimal;
use thiserror::Error;

use split_core::models::{CalculationInput, CalculationResult};
use split_core::share;
use split_core::utils::format_amount;

/// Title used when the user did not provide one.
const DEFAULT_TITLE: &str = "TipSplit Summary";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("nothing to export: perform a valid calculation with a bill amount first")]
    NothingToExport,
}

/// Builds the shareable query string for a performed calculation.
pub fn share_query(
    input: &CalculationInput,
    result: &CalculationResult,
    round_up: bool,
) -> Result<String, ExportError> {
    ensure_exportable(result)?;
    Ok(share::encode(input, round_up))
}

/// Renders the plain-text summary document for a performed calculation.
pub fn render_summary(
    input: &CalculationInput,
    result: &CalculationResult,
    round_up: bool,
) -> Result<String, ExportError> {
    ensure_exportable(result)?;

    let bill = input.bill_amount.unwrap_or(Decimal::ZERO);
    let tax = input.tax_amount.unwrap_or(Decimal::ZERO);

    let mut doc = String::new();
    let title = input.title.as_deref().unwrap_or(DEFAULT_TITLE);
    doc.push_str(title);
    doc.push('\n');

    if let Some(restaurant) = &input.restaurant_name {
        doc.push_str(&format!("Restaurant: {restaurant}\n"));
    }
    if let Some(location) = &input.location {
        doc.push_str(&format!("Location: {location}\n"));
    }
    if input.restaurant_name.is_some() || input.location.is_some() {
        doc.push('\n');
    }

    doc.push_str(&format!("Bill Amount: ${}\n", format_amount(bill)));
    if tax > Decimal::ZERO {
        doc.push_str(&format!("Tax Amount: ${}\n", format_amount(tax)));
    }
    doc.push_str(&format!("Tip Percentage: {}%\n", input.tip_percentage));
    doc.push_str(&format!("Number of People: {}\n", input.number_of_people));
    doc.push_str(&format!(
        "Round Up Per Person: {}\n",
        if round_up { "Yes" } else { "No" }
    ));
    doc.push_str("--------------------------\n");
    doc.push_str("Results:\n");
    doc.push_str(&format!(
        "Total Tip: ${}\n",
        format_amount(result.total_tip_amount)
    ));
    doc.push_str(&format!(
        "Total Bill (incl. Tax & Tip): ${}\n",
        format_amount(result.total_bill_with_tip)
    ));
    doc.push_str(&format!(
        "Tip Per Person: ${}\n",
        format_amount(result.tip_per_person)
    ));
    doc.push_str(&format!(
        "Total Per Person: ${}\n",
        format_amount(result.total_per_person)
    ));
    doc.push('\n');
    doc.push_str("Generated by TipSplit\n");

    Ok(doc)
}

fn ensure_exportable(result: &CalculationResult) -> Result<(), ExportError> {
    if result.total_per_person <= Decimal::ZERO {
        return Err(ExportError::NothingToExport);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use split_core::compute;

    use super::*;

    fn sample() -> (CalculationInput, CalculationResult) {
        let input = CalculationInput {
            bill_amount: Some(dec!(50)),
            tax_amount: Some(dec!(5)),
            tip_percentage: dec!(15),
            number_of_people: 3,
            title: Some("Birthday Dinner".to_string()),
            restaurant_name: Some("The Grand Eatery".to_string()),
            ..CalculationInput::default()
        };
        let result = compute(&input, true);
        (input, result)
    }

    #[test]
    fn summary_contains_inputs_and_rounded_results() {
        let (input, result) = sample();

        let doc = render_summary(&input, &result, true).unwrap();

        assert!(doc.starts_with("Birthday Dinner\n"));
        assert!(doc.contains("Restaurant: The Grand Eatery\n"));
        assert!(doc.contains("Bill Amount: $50.00\n"));
        assert!(doc.contains("Tax Amount: $5.00\n"));
        assert!(doc.contains("Tip Percentage: 15%\n"));
        assert!(doc.contains("Number of People: 3\n"));
        assert!(doc.contains("Round Up Per Person: Yes\n"));
        assert!(doc.contains("Total Tip: $8.00\n"));
        assert!(doc.contains("Total Bill (incl. Tax & Tip): $63.00\n"));
        assert!(doc.contains("Tip Per Person: $2.67\n"));
        assert!(doc.contains("Total Per Person: $21.00\n"));
    }

    #[test]
    fn summary_falls_back_to_default_title_and_omits_zero_tax() {
        let input = CalculationInput {
            bill_amount: Some(dec!(40)),
            tip_percentage: dec!(20),
            number_of_people: 2,
            ..CalculationInput::default()
        };
        let result = compute(&input, false);

        let doc = render_summary(&input, &result, false).unwrap();

        assert!(doc.starts_with("TipSplit Summary\n"));
        assert!(!doc.contains("Tax Amount"));
        assert!(!doc.contains("Restaurant:"));
    }

    #[test]
    fn export_is_rejected_without_a_positive_per_person_total() {
        let input = CalculationInput {
            tax_amount: Some(dec!(10)),
            ..CalculationInput::default()
        };
        let result = compute(&input, false);

        assert_eq!(
            render_summary(&input, &result, false),
            Err(ExportError::NothingToExport)
        );
        assert_eq!(
            share_query(&input, &result, false),
            Err(ExportError::NothingToExport)
        );
    }

    #[test]
    fn share_query_encodes_the_performed_calculation() {
        let (input, result) = sample();

        let query = share_query(&input, &result, true).unwrap();

        assert!(query.starts_with("bill=50&tax=5&tip=15&people=3"));
        assert!(query.ends_with("roundUp=true"));
    }
}
