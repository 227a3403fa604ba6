//! Validation error types
//!
//! Every variant's `Display` string is the default user-facing message for
//! that failure. Form schemas may override the message per constraint; the
//! variants here are the fallback wording.

use crate::password::PasswordRequirement;
use thiserror::Error;

/// A single validation failure.
///
/// Validation failures are expected, recoverable conditions and travel as
/// values, never through panics. Internal errors (a broken refinement, a bad
/// pattern) use a separate channel in the form pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Ensure this value has at least {min} characters (it has {length})")]
    TooShort { length: usize, min: usize },

    #[error("Ensure this value has at most {max} characters (it has {length})")]
    TooLong { length: usize, max: usize },

    #[error("Ensure this value has exactly {expected} characters (it has {length})")]
    WrongLength { length: usize, expected: usize },

    #[error("{0}")]
    PatternMismatch(String),

    #[error("Ensure this value is greater than or equal to {min}")]
    BelowMinimum { min: f64 },

    #[error("Ensure this value is less than or equal to {max}")]
    AboveMaximum { max: f64 },

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Enter a valid date")]
    InvalidDate,

    #[error("You must be at least {years} years old")]
    BelowMinimumAge { years: u32 },

    #[error("{}", .0.message())]
    PasswordRule(PasswordRequirement),

    #[error("Enter a valid CPF")]
    InvalidCpf,

    #[error("{0}")]
    Custom(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
