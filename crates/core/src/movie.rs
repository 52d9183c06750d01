//! Movie record constants and field validators.
//!
//! The `check_*` functions are wired into the request DTOs through
//! `#[validate(custom(...))]`, so create and update bodies share one set of
//! field rules.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors and log fields.
pub const ENTITY_NAME: &str = "Movie";

/// Lowest accepted rating (inclusive).
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating (inclusive).
pub const MAX_RATING: f64 = 10.0;

/// Confirmation returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Movie deleted successfully";

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Reject empty or whitespace-only text fields.
pub fn check_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("blank", "must not be blank".to_string()));
    }
    Ok(())
}

/// Ratings must be finite and within [`MIN_RATING`]..=[`MAX_RATING`].
pub fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() {
        return Err(field_error(
            "rating_not_finite",
            "must be a finite number".to_string(),
        ));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(field_error(
            "rating_range",
            format!("must be between {MIN_RATING} and {MAX_RATING}, got {rating}"),
        ));
    }
    Ok(())
}

/// Flatten derive-produced field errors into a single [`CoreError::Validation`].
///
/// Fields are listed alphabetically so the message is stable across runs.
pub fn validation_error(errors: &ValidationErrors) -> CoreError {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    parts.sort();
    CoreError::Validation(parts.join("; "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(check_not_blank("").is_err());
        assert!(check_not_blank("   \t").is_err());
    }

    #[test]
    fn non_blank_text_is_accepted() {
        assert!(check_not_blank("Dune").is_ok());
        assert!(check_not_blank("  Alien ").is_ok());
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(check_rating(0.0).is_ok());
        assert!(check_rating(10.0).is_ok());
        assert!(check_rating(7.5).is_ok());
    }

    #[test]
    fn rating_outside_range_is_rejected() {
        assert!(check_rating(-0.1).is_err());
        assert!(check_rating(10.01).is_err());
    }

    #[test]
    fn non_finite_rating_is_rejected() {
        assert!(check_rating(f64::NAN).is_err());
        assert!(check_rating(f64::INFINITY).is_err());
    }

    #[test]
    fn validation_error_lists_fields_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add("title", field_error("blank", "must not be blank".into()));
        errors.add("director", field_error("blank", "must not be blank".into()));

        match validation_error(&errors) {
            CoreError::Validation(msg) => {
                assert_eq!(msg, "director: must not be blank; title: must not be blank");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
