//! # Error Types
//!
//! Structured error types for mathub_core. Every failure a caller can see is
//! a value of [`CardError`], so a UI can show the message in place of the
//! generated deck and never offer a half-written file for download.
//!
//! ## Example
//!
//! ```rust
//! use mathub_core::errors::{CardError, CardResult};
//!
//! fn check_strength(fc_mpa: f64) -> CardResult<f64> {
//!     if fc_mpa <= 0.0 {
//!         return Err(CardError::derivation(
//!             "mat159_cscm",
//!             "fc_mpa",
//!             "compressive strength must be positive",
//!         ));
//!     }
//!     Ok(fc_mpa)
//! }
//!
//! assert!(check_strength(-5.0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mathub_core operations
pub type CardResult<T> = Result<T, CardError>;

/// What is wrong with a single input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FieldProblem {
    /// The value could not be read as a finite number
    NotNumeric,
    /// The value is smaller than the declared minimum
    BelowMinimum { min: f64 },
    /// The value is larger than the declared maximum
    AboveMaximum { max: f64 },
}

/// One rejected input field, with the raw value as the user supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field key (e.g. "fc_mpa")
    pub field: String,
    /// Offending value, as text
    pub value: String,
    /// The violated constraint
    pub problem: FieldProblem,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, value: impl Into<String>, problem: FieldProblem) -> Self {
        FieldIssue {
            field: field.into(),
            value: value.into(),
            problem,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.problem {
            FieldProblem::NotNumeric => write!(f, "{}: '{}' is not a number", self.field, self.value),
            FieldProblem::BelowMinimum { min } => {
                write!(f, "{}: {} is below the minimum {}", self.field, self.value, min)
            }
            FieldProblem::AboveMaximum { max } => {
                write!(f, "{}: {} is above the maximum {}", self.field, self.value, max)
            }
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Structured error type for card generation.
///
/// Each variant carries enough context for a caller to highlight the
/// offending input or report the failing formula.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CardError {
    /// One or more input fields failed type or range checks
    #[error("Invalid input: {}", join_issues(.issues))]
    Validation { issues: Vec<FieldIssue> },

    /// A formula left its physical domain (non-finite or undefined result)
    #[error("Derivation failed in {generator}: {quantity} - {reason}")]
    Derivation {
        generator: String,
        quantity: String,
        reason: String,
    },

    /// No generator is registered under this key
    #[error("Unknown generator: {key}")]
    UnknownGenerator { key: String },

    /// A generator key was registered twice
    #[error("Duplicate generator key: {key}")]
    DuplicateKey { key: String },

    /// File I/O error while reading inputs or writing a deck
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl CardError {
    /// Create a Validation error from collected field issues
    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        CardError::Validation { issues }
    }

    /// Create a Derivation error
    pub fn derivation(generator: impl Into<String>, quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CardError::Derivation {
            generator: generator.into(),
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownGenerator error
    pub fn unknown_generator(key: impl Into<String>) -> Self {
        CardError::UnknownGenerator { key: key.into() }
    }

    /// Create a DuplicateKey error
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        CardError::DuplicateKey { key: key.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CardError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Field issues carried by a Validation error (empty otherwise)
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            CardError::Validation { issues } => issues,
            _ => &[],
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CardError::Validation { .. } => "VALIDATION_ERROR",
            CardError::Derivation { .. } => "DERIVATION_ERROR",
            CardError::UnknownGenerator { .. } => "UNKNOWN_GENERATOR",
            CardError::DuplicateKey { .. } => "DUPLICATE_KEY",
            CardError::FileError { .. } => "FILE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CardError::validation(vec![FieldIssue::new(
            "fc_mpa",
            "-5",
            FieldProblem::BelowMinimum { min: 1.0 },
        )]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Validation\""));
        let roundtrip: CardError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CardError::unknown_generator("x").error_code(), "UNKNOWN_GENERATOR");
        assert_eq!(CardError::duplicate_key("x").error_code(), "DUPLICATE_KEY");
        assert_eq!(CardError::derivation("g", "q", "r").error_code(), "DERIVATION_ERROR");
    }

    #[test]
    fn test_validation_message_lists_every_issue() {
        let error = CardError::validation(vec![
            FieldIssue::new("fc_mpa", "-5", FieldProblem::BelowMinimum { min: 1.0 }),
            FieldIssue::new("ro", "abc", FieldProblem::NotNumeric),
        ]);
        let msg = error.to_string();
        assert!(msg.contains("fc_mpa: -5 is below the minimum 1"));
        assert!(msg.contains("ro: 'abc' is not a number"));
        assert_eq!(error.issues().len(), 2);
    }
}
