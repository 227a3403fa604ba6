//! Email format validator

use crate::{ValidationError, ValidationResult, Validator};
use regex::Regex;
use std::sync::LazyLock;

// Email pattern: local part, "@", domain labels with a final TLD label.
//
// Labels must not start or end with a hyphen, and at least one dot is
// required in the domain so bare hostnames are rejected.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("EMAIL_REGEX: invalid regex pattern")
});

/// Validates that a string value is a well-formed email address.
///
/// # Examples
///
/// ```
/// use varanda_validators::{EmailValidator, Validator};
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("resident@example.com").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// assert!(validator.validate("user@localhost").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmailValidator;

impl EmailValidator {
    /// Creates a new `EmailValidator`.
    pub fn new() -> Self {
        Self
    }
}

impl Validator<str> for EmailValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}
