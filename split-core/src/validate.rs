//! Form-field validation.
//!
//! Raw field values arrive as strings exactly as the user typed them. This
//! module parses and range-checks every field, reporting all violations at
//! once so a form can highlight each offending field, and produces the
//! validated [`CalculationInput`] the engine consumes.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::CalculationInput;
use crate::utils::parse_optional_decimal;

/// Upper bound on the bill amount in whole currency units.
pub const MAX_BILL_AMOUNT: u32 = 1_000_000;

/// Upper bound on the tax amount in whole currency units.
pub const MAX_TAX_AMOUNT: u32 = 50_000;

/// Upper bound on the tip percentage.
pub const MAX_TIP_PERCENTAGE: u32 = 100;

/// Bounds on the number of participants.
pub const MIN_PEOPLE: u32 = 1;
pub const MAX_PEOPLE: u32 = 100;

/// Maximum length of the free-text fields, in characters.
pub const MAX_TEXT_LEN: usize = 100;

/// Unvalidated form-field values.
///
/// Numeric fields stay as strings here so partial or malformed entry can be
/// carried around (pending replay, query decoding) and re-validated through
/// the same path as manual input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCalculationInput {
    pub bill_amount: String,
    pub tax_amount: String,
    pub tip_percentage: String,
    pub number_of_people: String,
    pub title: String,
    pub restaurant_name: String,
    pub location: String,
}

impl Default for RawCalculationInput {
    /// The empty form: 15% tip for one person.
    fn default() -> Self {
        Self {
            bill_amount: String::new(),
            tax_amount: String::new(),
            tip_percentage: "15".to_string(),
            number_of_people: "1".to_string(),
            title: String::new(),
            restaurant_name: String::new(),
            location: String::new(),
        }
    }
}

impl RawCalculationInput {
    /// Re-raws a validated input, e.g. to repopulate the form when a history
    /// entry is loaded for replay.
    pub fn from_input(input: &CalculationInput) -> Self {
        Self {
            bill_amount: input.bill_amount.map(|d| d.to_string()).unwrap_or_default(),
            tax_amount: input.tax_amount.map(|d| d.to_string()).unwrap_or_default(),
            tip_percentage: input.tip_percentage.to_string(),
            number_of_people: input.number_of_people.to_string(),
            title: input.title.clone().unwrap_or_default(),
            restaurant_name: input.restaurant_name.clone().unwrap_or_default(),
            location: input.location.clone().unwrap_or_default(),
        }
    }
}

/// Identifies the form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BillAmount,
    TaxAmount,
    TipPercentage,
    NumberOfPeople,
    Title,
    RestaurantName,
    Location,
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Field::BillAmount => "bill amount",
            Field::TaxAmount => "tax amount",
            Field::TipPercentage => "tip percentage",
            Field::NumberOfPeople => "number of people",
            Field::Title => "title",
            Field::RestaurantName => "restaurant name",
            Field::Location => "location",
        };
        f.write_str(name)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(
        field: Field,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The full set of field errors from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any error concerns the given field.
    pub fn has(
        &self,
        field: Field,
    ) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates raw form fields into a [`CalculationInput`].
///
/// Every field is checked even after the first failure so the caller can
/// surface all problems at once.
pub fn validate(raw: &RawCalculationInput) -> Result<CalculationInput, ValidationErrors> {
    let mut errors = Vec::new();

    let bill_amount = validate_bill(&raw.bill_amount, &mut errors);
    let tax_amount = validate_tax(&raw.tax_amount, &mut errors);
    let tip_percentage = validate_tip(&raw.tip_percentage, &mut errors);
    let number_of_people = validate_people(&raw.number_of_people, &mut errors);
    let title = validate_text(&raw.title, Field::Title, &mut errors);
    let restaurant_name = validate_text(&raw.restaurant_name, Field::RestaurantName, &mut errors);
    let location = validate_text(&raw.location, Field::Location, &mut errors);

    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    Ok(CalculationInput {
        bill_amount,
        tax_amount,
        tip_percentage: tip_percentage.unwrap_or_default(),
        number_of_people: number_of_people.unwrap_or(MIN_PEOPLE),
        title,
        restaurant_name,
        location,
    })
}

fn validate_bill(
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    match parse_optional_decimal(raw) {
        Err(_) => {
            errors.push(FieldError::new(
                Field::BillAmount,
                "please enter a valid number",
            ));
            None
        }
        Ok(None) => None,
        Ok(Some(value)) => {
            if value <= Decimal::ZERO {
                errors.push(FieldError::new(
                    Field::BillAmount,
                    "bill amount must be greater than 0",
                ));
                None
            } else if value > Decimal::from(MAX_BILL_AMOUNT) {
                errors.push(FieldError::new(
                    Field::BillAmount,
                    "bill amount seems too high",
                ));
                None
            } else {
                Some(value)
            }
        }
    }
}

fn validate_tax(
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    match parse_optional_decimal(raw) {
        Err(_) => {
            errors.push(FieldError::new(
                Field::TaxAmount,
                "please enter a valid number",
            ));
            None
        }
        Ok(None) => None,
        Ok(Some(value)) => {
            if value < Decimal::ZERO {
                errors.push(FieldError::new(
                    Field::TaxAmount,
                    "tax amount must be 0 or more",
                ));
                None
            } else if value > Decimal::from(MAX_TAX_AMOUNT) {
                errors.push(FieldError::new(
                    Field::TaxAmount,
                    format!("tax amount cannot exceed {MAX_TAX_AMOUNT}"),
                ));
                None
            } else {
                Some(value)
            }
        }
    }
}

fn validate_tip(
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Decimal> {
    match parse_optional_decimal(raw) {
        Err(_) => {
            errors.push(FieldError::new(
                Field::TipPercentage,
                "please enter a valid number",
            ));
            None
        }
        Ok(None) => {
            errors.push(FieldError::new(
                Field::TipPercentage,
                "tip percentage is required",
            ));
            None
        }
        Ok(Some(value)) => {
            if value < Decimal::ZERO || value > Decimal::from(MAX_TIP_PERCENTAGE) {
                errors.push(FieldError::new(
                    Field::TipPercentage,
                    format!("tip percentage must be between 0 and {MAX_TIP_PERCENTAGE}"),
                ));
                None
            } else {
                Some(value)
            }
        }
    }
}

fn validate_people(
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(
            Field::NumberOfPeople,
            "number of people is required",
        ));
        return None;
    }
    match trimmed.parse::<u32>() {
        Err(_) => {
            errors.push(FieldError::new(
                Field::NumberOfPeople,
                "number of people must be a whole number",
            ));
            None
        }
        Ok(value) => {
            if !(MIN_PEOPLE..=MAX_PEOPLE).contains(&value) {
                errors.push(FieldError::new(
                    Field::NumberOfPeople,
                    format!("number of people must be between {MIN_PEOPLE} and {MAX_PEOPLE}"),
                ));
                None
            } else {
                Some(value)
            }
        }
    }
}

fn validate_text(
    raw: &str,
    field: Field,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw.chars().count() > MAX_TEXT_LEN {
        errors.push(FieldError::new(
            field,
            format!("cannot exceed {MAX_TEXT_LEN} characters"),
        ));
        return None;
    }
    Some(raw.to_string())
}
