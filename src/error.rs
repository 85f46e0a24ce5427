//! Error types for the split engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that makes a split or a configuration load fail.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the split engine.
///
/// All fallible operations in the engine return this error type. None of the
/// variants are fatal: callers translate them into user-facing messages.
///
/// # Example
///
/// ```
/// use split_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The member list passed to a split was empty.
    #[error("member list must not be empty")]
    EmptyMembers,

    /// The bill total was zero or negative.
    #[error("total amount must be positive, got {total_amount}")]
    NonPositiveTotal {
        /// The rejected total, in minor currency units.
        total_amount: i64,
    },

    /// The members' stay days sum to zero (or less).
    #[error("total stay days must be positive")]
    ZeroStayDays,

    /// A member record was invalid.
    #[error("Invalid member '{member_id}': {message}")]
    InvalidMember {
        /// The ID of the invalid member.
        member_id: String,
        /// A description of what made the member invalid.
        message: String,
    },

    /// The same member ID appeared more than once.
    #[error("Duplicate member '{member_id}'")]
    DuplicateMember {
        /// The repeated member ID.
        member_id: String,
    },

    /// An expense type requires a custom setting that was not supplied.
    #[error("{expense_type} split requires custom setting '{field}'")]
    MissingSetting {
        /// The expense type being split.
        expense_type: String,
        /// The missing settings field.
        field: String,
    },

    /// A custom setting was present but unusable.
    #[error("Invalid custom setting '{field}': {message}")]
    InvalidSetting {
        /// The settings field that was invalid.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The custom rule named in the settings is not known.
    #[error("Unknown custom rule: {rule}")]
    UnknownCustomRule {
        /// The rule name that was supplied.
        rule: String,
    },

    /// The reconciled shares did not add up to the bill total.
    #[error("split result verification failed: expected {expected}, got {actual}")]
    VerificationFailed {
        /// The bill total.
        expected: i64,
        /// The sum of the reconciled shares.
        actual: i64,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// A date range ended before it started.
    #[error("Invalid date range: {start_date} is after {end_date}")]
    InvalidDateRange {
        /// The start of the range.
        start_date: NaiveDate,
        /// The end of the range.
        end_date: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_empty_members_message() {
        assert_eq!(
            EngineError::EmptyMembers.to_string(),
            "member list must not be empty"
        );
    }

    #[test]
    fn test_missing_setting_displays_type_and_field() {
        let error = EngineError::MissingSetting {
            expense_type: "host".to_string(),
            field: "hostUsageRatio".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "host split requires custom setting 'hostUsageRatio'"
        );
    }

    #[test]
    fn test_verification_failed_displays_totals() {
        let error = EngineError::VerificationFailed {
            expected: 100,
            actual: 101,
        };
        assert_eq!(
            error.to_string(),
            "split result verification failed: expected 100, got 101"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "share out of range".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: share out of range");
    }

    #[test]
    fn test_invalid_date_range_displays_dates() {
        let error = EngineError::InvalidDateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: 2025-03-10 is after 2025-03-01"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_zero_stay_days() -> EngineResult<()> {
            Err(EngineError::ZeroStayDays)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_zero_stay_days()?;
            Ok(())
        }

        assert_eq!(propagates_error(), Err(EngineError::ZeroStayDays));
    }
}
