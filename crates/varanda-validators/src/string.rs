//! String validators
//!
//! Length checks count characters, not bytes, so multi-byte input (accented
//! names, CJK, emoji) is measured the way a resident typing into the form
//! perceives it.

use crate::{ValidationError, ValidationResult, Validator};
use regex::Regex;

/// Validates that a string is non-empty after trimming whitespace.
pub struct RequiredValidator;

impl RequiredValidator {
    /// Creates a new `RequiredValidator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{RequiredValidator, Validator};
    ///
    /// let validator = RequiredValidator::new();
    /// assert!(validator.validate("Alice").is_ok());
    /// assert!(validator.validate("   ").is_err());
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Validator<str> for RequiredValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            Err(ValidationError::Required)
        } else {
            Ok(())
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum length validator
pub struct MinLengthValidator {
    min: usize,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator with the specified minimum length.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{MinLengthValidator, Validator};
    ///
    /// let validator = MinLengthValidator::new(5);
    /// assert!(validator.validate("hello").is_ok());
    /// assert!(validator.validate("hi").is_err());
    /// ```
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator<str> for MinLengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length >= self.min {
            Ok(())
        } else {
            Err(ValidationError::TooShort {
                length,
                min: self.min,
            })
        }
    }
}

impl Validator<String> for MinLengthValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        Validator::<str>::validate(self, value.as_str())
    }
}

/// Maximum length validator
pub struct MaxLengthValidator {
    max: usize,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator with the specified maximum length.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{MaxLengthValidator, Validator};
    ///
    /// let validator = MaxLengthValidator::new(10);
    /// assert!(validator.validate("hello").is_ok());
    /// assert!(validator.validate("hello world").is_err());
    /// ```
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator<str> for MaxLengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length <= self.max {
            Ok(())
        } else {
            Err(ValidationError::TooLong {
                length,
                max: self.max,
            })
        }
    }
}

impl Validator<String> for MaxLengthValidator {
    fn validate(&self, value: &String) -> ValidationResult<()> {
        Validator::<str>::validate(self, value.as_str())
    }
}

/// Exact length validator
///
/// Used for unmasked fixed-width values (postal codes, CPF digits) where a
/// partially typed mask strips to a shorter digit string that must fail here
/// rather than panic downstream.
pub struct ExactLengthValidator {
    expected: usize,
}

impl ExactLengthValidator {
    /// Creates a new ExactLengthValidator with the expected length.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{ExactLengthValidator, Validator};
    ///
    /// let validator = ExactLengthValidator::new(8);
    /// assert!(validator.validate("04538133").is_ok());
    /// assert!(validator.validate("0453813").is_err());
    /// ```
    pub fn new(expected: usize) -> Self {
        Self { expected }
    }
}

impl Validator<str> for ExactLengthValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length == self.expected {
            Ok(())
        } else {
            Err(ValidationError::WrongLength {
                length,
                expected: self.expected,
            })
        }
    }
}

/// Regex validator
pub struct RegexValidator {
    regex: Regex,
    message: String,
}

impl RegexValidator {
    /// Creates a new RegexValidator with the specified regex pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{RegexValidator, Validator};
    ///
    /// let validator = RegexValidator::new(r"^[A-Z]{2}$").unwrap();
    /// assert!(validator.validate("SP").is_ok());
    /// assert!(validator.validate("sao paulo").is_err());
    /// ```
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: format!("Value must match pattern: {}", pattern),
        })
    }

    /// Sets a custom error message for the validator.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{RegexValidator, Validator};
    ///
    /// let validator = RegexValidator::new(r"^\d+$")
    ///     .unwrap()
    ///     .with_message("Value must contain only digits");
    ///
    /// assert!(validator.validate("12345").is_ok());
    /// assert!(validator.validate("abc").is_err());
    /// ```
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for RegexValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        if self.regex.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::PatternMismatch(self.message.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Alice")]
    #[case("  a  ")]
    fn test_required_validator_valid(#[case] value: &str) {
        // Arrange
        let validator = RequiredValidator::new();

        // Act
        let result = validator.validate(value);

        // Assert
        assert!(result.is_ok(), "Expected '{value}' to satisfy required");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_required_validator_invalid(#[case] value: &str) {
        // Arrange
        let validator = RequiredValidator::new();

        // Act
        let result = validator.validate(value);

        // Assert
        assert_eq!(result, Err(ValidationError::Required));
    }

    #[rstest]
    fn test_min_length_counts_characters_not_bytes() {
        // Arrange: 3 multi-byte characters are 3 characters, not 9 bytes
        let validator = MinLengthValidator::new(3);

        // Act & Assert
        assert!(validator.validate("José").is_ok());
        assert!(validator.validate("ábç").is_ok());
        assert!(validator.validate("áb").is_err());
    }

    #[rstest]
    #[case("12345678", true)]
    #[case("1234567", false)]
    #[case("123456789", false)]
    #[case("", false)]
    fn test_exact_length_validator(#[case] value: &str, #[case] expected_ok: bool) {
        // Arrange
        let validator = ExactLengthValidator::new(8);

        // Act
        let result = validator.validate(value);

        // Assert
        assert_eq!(result.is_ok(), expected_ok);
    }

    #[rstest]
    fn test_regex_validator_custom_message() {
        // Arrange
        let validator = RegexValidator::new(r"^\d+$")
            .unwrap()
            .with_message("Digits only");

        // Act
        let result = validator.validate("abc");

        // Assert
        match result {
            Err(ValidationError::PatternMismatch(msg)) => assert_eq!(msg, "Digits only"),
            other => panic!("Expected PatternMismatch, got {:?}", other),
        }
    }

    #[rstest]
    fn test_regex_validator_rejects_bad_pattern() {
        // Arrange & Act
        let result = RegexValidator::new("[unclosed");

        // Assert
        assert!(result.is_err());
    }
}
