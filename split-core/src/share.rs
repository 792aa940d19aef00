//! Shareable-link query codec.
//!
//! A calculation is shared as a flat query string (`bill`, `tax`, `tip`,
//! `people`, `title`, `restaurant`, `location`, `roundUp`). Decoding is
//! best-effort: whatever recognized keys are present override the default
//! form values, and the decoded record re-enters the normal validation path
//! before anything is computed.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::models::CalculationInput;
use crate::validate::RawCalculationInput;

/// Characters percent-encoded in query values. Covers the query-component
/// delimiters plus `%` and `+` so decoding is unambiguous.
const QUERY_VALUE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

/// Result of decoding a share query: raw form values plus the optional
/// round-up flag (only honored when the parameter is literally
/// `true` or `false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShare {
    pub raw: RawCalculationInput,
    pub round_up: Option<bool>,
}

/// Encodes a validated input and the active round-up flag as a query string.
///
/// Absent fields are omitted; `roundUp` is always present.
pub fn encode(
    input: &CalculationInput,
    round_up: bool,
) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    if let Some(bill) = input.bill_amount {
        pairs.push(("bill", bill.to_string()));
    }
    if let Some(tax) = input.tax_amount {
        pairs.push(("tax", tax.to_string()));
    }
    pairs.push(("tip", input.tip_percentage.to_string()));
    pairs.push(("people", input.number_of_people.to_string()));
    if let Some(title) = &input.title {
        pairs.push(("title", title.clone()));
    }
    if let Some(restaurant) = &input.restaurant_name {
        pairs.push(("restaurant", restaurant.clone()));
    }
    if let Some(location) = &input.location {
        pairs.push(("location", location.clone()));
    }
    pairs.push(("roundUp", round_up.to_string()));

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE_SET)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a query string into raw form values.
///
/// Returns `None` when no recognized field key is present (`roundUp` alone
/// does not count). Unknown keys are ignored; repeated keys keep the last
/// value. A leading `?` is tolerated.
pub fn decode(query: &str) -> Option<DecodedShare> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut raw = RawCalculationInput::default();
    let mut round_up = None;
    let mut any_field = false;

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value);

        match key {
            "bill" => {
                raw.bill_amount = value;
                any_field = true;
            }
            "tax" => {
                raw.tax_amount = value;
                any_field = true;
            }
            "tip" => {
                raw.tip_percentage = value;
                any_field = true;
            }
            "people" => {
                raw.number_of_people = value;
                any_field = true;
            }
            "title" => {
                raw.title = value;
                any_field = true;
            }
            "restaurant" => {
                raw.restaurant_name = value;
                any_field = true;
            }
            "location" => {
                raw.location = value;
                any_field = true;
            }
            "roundUp" => {
                round_up = match value.as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => round_up,
                };
            }
            _ => {}
        }
    }

    if any_field {
        Some(DecodedShare { raw, round_up })
    } else {
        None
    }
}

/// Percent-decodes one query component, with `+` treated as a space
/// (form-urlencoded convention).
fn decode_component(value: &str) -> String {
    let unplussed = value.replace('+', " ");
    match percent_decode_str(&unplussed).decode_utf8_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::validate::validate;

    fn sample_input() -> CalculationInput {
        CalculationInput {
            bill_amount: Some(dec!(50.00)),
            tax_amount: Some(dec!(5.00)),
            tip_percentage: dec!(15),
            number_of_people: 3,
            title: Some("Birthday Dinner".to_string()),
            restaurant_name: Some("The Grand Eatery".to_string()),
            location: None,
        }
    }

    #[test]
    fn encode_omits_absent_fields_and_always_includes_round_up() {
        let input = CalculationInput::default();

        let query = encode(&input, false);

        assert_eq!(query, "tip=15&people=1&roundUp=false");
    }

    #[test]
    fn encode_percent_encodes_text_values() {
        let query = encode(&sample_input(), true);

        assert!(query.contains("title=Birthday%20Dinner"));
        assert!(query.contains("restaurant=The%20Grand%20Eatery"));
        assert!(query.ends_with("roundUp=true"));
    }

    #[test]
    fn encode_decode_validate_round_trips_losslessly() {
        let input = sample_input();

        let decoded = decode(&encode(&input, true)).unwrap();

        assert_eq!(decoded.round_up, Some(true));
        assert_eq!(validate(&decoded.raw).unwrap(), input);
    }

    #[test]
    fn decode_overrides_only_the_keys_present() {
        let decoded = decode("bill=40").unwrap();

        assert_eq!(decoded.raw.bill_amount, "40");
        // Untouched fields keep the form defaults.
        assert_eq!(decoded.raw.tip_percentage, "15");
        assert_eq!(decoded.raw.number_of_people, "1");
        assert_eq!(decoded.round_up, None);
    }

    #[test]
    fn decode_tolerates_a_leading_question_mark() {
        let decoded = decode("?bill=40&people=2").unwrap();

        assert_eq!(decoded.raw.bill_amount, "40");
        assert_eq!(decoded.raw.number_of_people, "2");
    }

    #[test]
    fn decode_treats_plus_as_space() {
        let decoded = decode("title=Team+Lunch&bill=12").unwrap();

        assert_eq!(decoded.raw.title, "Team Lunch");
    }

    #[test]
    fn round_up_alone_is_not_a_share() {
        assert_eq!(decode("roundUp=true"), None);
    }

    #[test]
    fn round_up_accepts_only_literal_booleans() {
        let decoded = decode("bill=10&roundUp=yes").unwrap();

        assert_eq!(decoded.round_up, None);
    }

    #[test]
    fn decode_rejects_queries_with_no_recognized_keys() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("utm_source=mail&foo=bar"), None);
    }

    #[test]
    fn decoded_garbage_still_fails_validation_downstream() {
        let decoded = decode("bill=abc&people=0").unwrap();

        assert!(validate(&decoded.raw).is_err());
    }
}
