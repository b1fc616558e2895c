//! Field-level input validation.
//!
//! Validation sits in front of the calculation engine and rejects bad data
//! before it reaches the resolver or aggregator. Every check reports a
//! [`ValidationError`] naming the offending field, and all problems are
//! collected rather than stopping at the first, so a caller can surface
//! them in a single round trip.

mod inputs;
mod quote;

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use inputs::{CategoryInput, JobInput, LineItemInput, SettingsInput};
pub use quote::validate_quote;

/// Maximum nesting depth of categories. Top-level categories have depth 1.
pub const MAX_CATEGORY_DEPTH: usize = 3;

/// Maximum length of a name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The field that failed, e.g. `name` or `line_items[2].quantity`.
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for a field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks whether a child may be added under a parent at `parent_depth`.
///
/// Returns an error on `parent_id` when the child would be nested deeper
/// than [`MAX_CATEGORY_DEPTH`].
///
/// # Example
///
/// ```
/// use quote_engine::validation::validate_category_depth;
///
/// assert!(validate_category_depth(2).is_none());
/// assert!(validate_category_depth(3).is_some());
/// ```
pub fn validate_category_depth(parent_depth: usize) -> Option<ValidationError> {
    (parent_depth >= MAX_CATEGORY_DEPTH).then(|| {
        ValidationError::new(
            "parent_id",
            format!("Maximum category nesting depth is {} levels", MAX_CATEGORY_DEPTH),
        )
    })
}

pub(crate) fn check_name(field: &str, name: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(field, "Name is required"));
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(ValidationError::new(
            field,
            format!("Name must be less than {} characters", MAX_NAME_LENGTH),
        ));
    }
}

pub(crate) fn check_surcharge(
    field: &str,
    percent: Option<Decimal>,
    errors: &mut Vec<ValidationError>,
) {
    if percent.is_some_and(|p| p.is_sign_negative() && !p.is_zero()) {
        errors.push(ValidationError::new(field, "Surcharge cannot be negative"));
    }
}

pub(crate) fn check_quantity(field: &str, quantity: Decimal, errors: &mut Vec<ValidationError>) {
    if quantity <= Decimal::ZERO {
        errors.push(ValidationError::new(field, "Quantity must be greater than 0"));
    }
}

pub(crate) fn check_unit_price(field: &str, unit_price: Decimal, errors: &mut Vec<ValidationError>) {
    if unit_price < Decimal::ZERO {
        errors.push(ValidationError::new(field, "Unit price cannot be negative"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_depth_limit() {
        assert!(validate_category_depth(0).is_none());
        assert!(validate_category_depth(1).is_none());
        assert!(validate_category_depth(2).is_none());

        let error = validate_category_depth(3).unwrap();
        assert_eq!(error.field, "parent_id");
        assert_eq!(error.message, "Maximum category nesting depth is 3 levels");
    }

    #[test]
    fn test_check_name() {
        let mut errors = Vec::new();
        check_name("name", "Kitchen", &mut errors);
        check_name("name", &"a".repeat(255), &mut errors);
        assert!(errors.is_empty());

        check_name("name", "   ", &mut errors);
        check_name("name", &"a".repeat(256), &mut errors);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Name is required");
        assert_eq!(errors[1].message, "Name must be less than 255 characters");
    }

    #[test]
    fn test_check_surcharge_allows_zero_and_absent() {
        let mut errors = Vec::new();
        check_surcharge("surcharge_percent", None, &mut errors);
        check_surcharge("surcharge_percent", Some(Decimal::ZERO), &mut errors);
        check_surcharge("surcharge_percent", Some(dec("-0.00")), &mut errors);
        check_surcharge("surcharge_percent", Some(dec("12.5")), &mut errors);
        assert!(errors.is_empty());

        check_surcharge("surcharge_percent", Some(dec("-1")), &mut errors);
        assert_eq!(
            errors,
            vec![ValidationError::new(
                "surcharge_percent",
                "Surcharge cannot be negative"
            )]
        );
    }

    #[test]
    fn test_check_quantity_and_price() {
        let mut errors = Vec::new();
        check_quantity("quantity", dec("0.01"), &mut errors);
        check_unit_price("unit_price", Decimal::ZERO, &mut errors);
        assert!(errors.is_empty());

        check_quantity("quantity", Decimal::ZERO, &mut errors);
        check_unit_price("unit_price", dec("-0.01"), &mut errors);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["quantity", "unit_price"]);
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new("unit", "Unit is required");
        assert_eq!(error.to_string(), "unit: Unit is required");
    }
}
