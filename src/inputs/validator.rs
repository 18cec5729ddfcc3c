//! Range and type checks on raw calculator inputs
//!
//! Every field is checked independently and all violations are collected, so a
//! caller can show each error next to its field at once.

use std::fmt;

use log::warn;
use thiserror::Error;

use super::data::{Field, GrowthModel, RawInputs, ValidatedInputs};

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldErrorReason {
    #[error("not a finite number")]
    NotANumber,
    #[error("must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub model: GrowthModel,
    pub reason: FieldErrorReason,
}

impl FieldError {
    /// Message suitable for showing next to the input
    pub fn message(&self) -> &'static str {
        match (self.model, self.field) {
            (GrowthModel::CompoundContribution, Field::Principal) => {
                "Please enter a valid amount (0-999,999,999)"
            }
            (GrowthModel::CompoundContribution, Field::Rate) => {
                "Please enter a valid interest rate (0-100%)"
            }
            (GrowthModel::CompoundContribution, Field::Contribution) => {
                "Please enter a valid monthly savings amount (0-999,999,999)"
            }
            (GrowthModel::AnnualCompounding, Field::Principal) => {
                "Please enter a valid income (0 - 999,999,999)"
            }
            (GrowthModel::AnnualCompounding, _) => "Please enter a valid percentage (0 - 100)",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(self.model), self.reason)
    }
}

/// All field errors from one validation run (never empty)
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Error for a given field, if that field was rejected
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate raw text inputs.
///
/// A blank monthly savings field on the interest calculator counts as 0.
pub fn validate(raw: &RawInputs) -> Result<ValidatedInputs, ValidationErrors> {
    let contribution_text = raw.contribution.trim();
    let contribution = if contribution_text.is_empty() && raw.model == GrowthModel::CompoundContribution {
        Some(0.0)
    } else {
        parse_number(contribution_text)
    };

    let result = check_values(
        raw.model,
        parse_number(&raw.principal),
        parse_number(&raw.rate),
        contribution,
    );

    if let Err(errors) = &result {
        warn!("Rejected {} inputs: {}", raw.model.as_str(), errors);
    }
    result
}

/// Parse a field as a finite real number
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Check parsed values against their bounds. `None` means the text did not parse.
pub(crate) fn check_values(
    model: GrowthModel,
    principal: Option<f64>,
    rate: Option<f64>,
    contribution: Option<f64>,
) -> Result<ValidatedInputs, ValidationErrors> {
    let mut errors = Vec::new();

    let principal = check_field(model, Field::Principal, principal, &mut errors);
    let rate = check_field(model, Field::Rate, rate, &mut errors);
    let contribution = check_field(model, Field::Contribution, contribution, &mut errors);

    match (principal, rate, contribution) {
        (Some(principal), Some(rate), Some(contribution)) if errors.is_empty() => {
            Ok(ValidatedInputs::from_checked(model, principal, rate, contribution))
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn check_field(
    model: GrowthModel,
    field: Field,
    value: Option<f64>,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let reason = match value {
        Some(v) if !v.is_finite() => FieldErrorReason::NotANumber,
        Some(v) => {
            let (min, max) = field.bounds(model);
            if v >= min && v <= max {
                // -0.0 would otherwise print as "-0.00"
                return Some(v + 0.0);
            }
            FieldErrorReason::OutOfRange { min, max }
        }
        None => FieldErrorReason::NotANumber,
    };

    errors.push(FieldError { field, model, reason });
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_interest_inputs() {
        let inputs = validate(&RawInputs::interest("10000", "5", "500")).unwrap();
        assert_eq!(inputs.model(), GrowthModel::CompoundContribution);
        assert_eq!(inputs.principal(), 10000.0);
        assert_eq!(inputs.rate(), 5.0);
        assert_eq!(inputs.contribution(), 500.0);
    }

    #[test]
    fn test_negative_rate_is_the_only_error() {
        let errors = validate(&RawInputs::interest("10000", "-1", "0")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, Field::Rate);
        assert_eq!(
            errors.errors()[0].reason,
            FieldErrorReason::OutOfRange { min: 0.0, max: 100.0 }
        );
    }

    #[test]
    fn test_principal_above_bound_is_the_only_error() {
        let errors = validate(&RawInputs::income("1000000000", "2", "1.2")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.for_field(Field::Principal).is_some());
        assert!(errors.for_field(Field::Rate).is_none());
    }

    #[test]
    fn test_bounds_are_closed() {
        assert!(validate(&RawInputs::interest("999999999", "100", "999999999")).is_ok());
        assert!(validate(&RawInputs::income("0", "0", "100")).is_ok());
    }

    #[test]
    fn test_all_errors_collected() {
        let errors = validate(&RawInputs::income("abc", "101", "")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.for_field(Field::Principal).map(|e| &e.reason),
            Some(&FieldErrorReason::NotANumber)
        );
        assert_eq!(
            errors.for_field(Field::Contribution).map(|e| e.message()),
            Some("Please enter a valid percentage (0 - 100)")
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let errors = validate(&RawInputs::interest("inf", "NaN", "1e400")).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.errors().iter().all(|e| e.reason == FieldErrorReason::NotANumber));

        assert!(ValidatedInputs::new(GrowthModel::CompoundContribution, f64::NAN, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_blank_monthly_savings_defaults_to_zero() {
        let inputs = validate(&RawInputs::interest(" 2500 ", "3.5", "  ")).unwrap();
        assert_eq!(inputs.contribution(), 0.0);
        assert_eq!(inputs.principal(), 2500.0);
    }

    #[test]
    fn test_savings_percent_limited_to_hundred() {
        let errors = validate(&RawInputs::income("300000", "2", "150")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, Field::Contribution);

        // Same value is a valid monthly savings amount
        assert!(validate(&RawInputs::interest("300000", "2", "150")).is_ok());
    }

    #[test]
    fn test_negative_zero_normalized() {
        let inputs = validate(&RawInputs::interest("-0", "0", "0")).unwrap();
        assert!(inputs.principal().is_sign_positive());
    }

    #[test]
    fn test_display_lists_every_field() {
        let errors = validate(&RawInputs::interest("-5", "x", "0")).unwrap_err();
        let text = errors.to_string();
        assert!(text.contains("Start Amount: must be between 0 and 999999999"));
        assert!(text.contains("Interest Rate: not a finite number"));
    }
}
