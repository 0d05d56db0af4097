//! Field validation rules for the login form.
//!
//! Validation is a pure function of the field values. Every field is checked
//! independently so a single submit attempt reports all failures at once.

use std::collections::BTreeMap;

use thiserror::Error;

use super::{Field, LoginAttempt};

/// A required field was empty (or only whitespace) at submit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} is required.")]
pub struct RequiredFieldError {
    pub field: Field,
}

/// Field name -> error, ordered the way the fields appear on the card
pub type FieldErrors = BTreeMap<Field, RequiredFieldError>;

/// Check a single field
pub fn validate_field(values: &LoginAttempt, field: Field) -> Option<RequiredFieldError> {
    if values.get(field).trim().is_empty() {
        Some(RequiredFieldError { field })
    } else {
        None
    }
}

/// Check every field, collecting all errors
pub fn validate(values: &LoginAttempt) -> FieldErrors {
    Field::ALL
        .iter()
        .filter_map(|&field| validate_field(values, field).map(|err| (field, err)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(username: &str, password: &str) -> LoginAttempt {
        LoginAttempt {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_pair_has_no_errors() {
        assert!(validate(&attempt("alice", "secret")).is_empty());
    }

    #[test]
    fn test_empty_username_only() {
        let errors = validate(&attempt("", "secret"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&Field::Username].to_string(), "Username is required.");
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let errors = validate(&attempt("   \t", " \n "));
        assert!(errors.contains_key(&Field::Username));
        assert!(errors.contains_key(&Field::Password));
    }

    #[test]
    fn test_both_empty_reports_both() {
        let errors = validate(&attempt("", ""));
        let messages: Vec<String> = errors.values().map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["Username is required.", "Password is required."]);
    }

    #[test]
    fn test_single_field_check() {
        let values = attempt("bob", "");
        assert_eq!(validate_field(&values, Field::Username), None);
        assert_eq!(
            validate_field(&values, Field::Password),
            Some(RequiredFieldError { field: Field::Password })
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_accepted() {
        // Only the emptiness check trims; the value itself is kept as typed
        assert!(validate(&attempt("  alice ", " pw")).is_empty());
    }
}
