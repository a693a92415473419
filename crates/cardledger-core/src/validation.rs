//! Validation utilities.

use crate::{FieldError, LedgerError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `LedgerError` on failure.
    fn validate_request(&self) -> Result<(), LedgerError> {
        self.validate().map_err(validation_errors_to_ledger_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `LedgerError`.
#[must_use]
pub fn validation_errors_to_ledger_error(errors: ValidationErrors) -> LedgerError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    LedgerError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a card number: digits only, 8 to 19 characters (ISO/IEC 7812).
    pub fn valid_card_number(number: &str) -> Result<(), ValidationError> {
        if number.len() < 8 {
            return Err(ValidationError::new("card_number_too_short"));
        }
        if number.len() > 19 {
            return Err(ValidationError::new("card_number_too_long"));
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new("card_number_invalid_characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_valid_card_number() {
        assert!(valid_card_number("4111111111111111").is_ok());
        assert!(valid_card_number("12345678").is_ok());
        assert!(valid_card_number("1234567").is_err()); // too short
        assert!(valid_card_number("12345678901234567890").is_err()); // too long
        assert!(valid_card_number("4111-1111-1111-1111").is_err()); // separators
    }
}
