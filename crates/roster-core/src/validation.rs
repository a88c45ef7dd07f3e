//! Validation utilities.

use crate::{FieldError, RosterError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `RosterError` on failure.
    fn validate_request(&self) -> Result<(), RosterError> {
        self.validate().map_err(validation_errors_to_roster_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by field
/// name so that messages are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
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
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `RosterError`.
#[must_use]
pub fn validation_errors_to_roster_error(errors: ValidationErrors) -> RosterError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    RosterError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates a sort direction parameter.
    pub fn sort_order(value: &str) -> Result<(), ValidationError> {
        match value {
            "asc" | "desc" => Ok(()),
            _ => {
                let mut err = ValidationError::new("sort_order");
                err.message = Some("Sort order must be 'asc' or 'desc'".into());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct ListParams {
        #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
        limit: u64,
        #[validate(custom(function = "rules::sort_order"))]
        sort_order: String,
    }

    #[test]
    fn test_sort_order_rule() {
        assert!(rules::sort_order("asc").is_ok());
        assert!(rules::sort_order("desc").is_ok());
        assert!(rules::sort_order("ASC").is_err());
        assert!(rules::sort_order("").is_err());
    }

    #[test]
    fn test_validate_request_ok() {
        let params = ListParams {
            limit: 10,
            sort_order: "asc".to_string(),
        };
        assert!(params.validate_request().is_ok());
    }

    #[test]
    fn test_validate_request_collects_all_fields() {
        let params = ListParams {
            limit: 0,
            sort_order: "sideways".to_string(),
        };
        let err = params.validate_request().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("limit: Limit must be between 1 and 100"));
        assert!(message.contains("sort_order: Sort order must be 'asc' or 'desc'"));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_field_errors_are_sorted() {
        let params = ListParams {
            limit: 500,
            sort_order: "up".to_string(),
        };
        let errors = params.validate().unwrap_err();
        let fields: Vec<_> = field_errors(&errors).into_iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["limit", "sort_order"]);
    }
}
