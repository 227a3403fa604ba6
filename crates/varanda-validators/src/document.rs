//! Brazilian CPF check-digit validation
//!
//! Operates on the unmasked 11-digit string produced by the CPF mask. The
//! check digits use the standard modulo-11 scheme: the first verifier weighs
//! the first nine digits 10 down to 2, the second weighs the first ten digits
//! 11 down to 2.

use crate::{ValidationError, ValidationResult, Validator};

/// Validates CPF check digits on an unmasked 11-digit string.
///
/// # Examples
///
/// ```
/// use varanda_validators::{CpfValidator, Validator};
///
/// let validator = CpfValidator::new();
/// assert!(validator.validate("52998224725").is_ok());
/// assert!(validator.validate("52998224724").is_err()); // wrong check digit
/// assert!(validator.validate("11111111111").is_err()); // repeated digits
/// assert!(validator.validate("5299822472").is_err()); // too short
/// ```
#[derive(Debug, Clone)]
pub struct CpfValidator;

impl CpfValidator {
    /// Creates a new `CpfValidator`.
    pub fn new() -> Self {
        Self
    }

    fn verifier(digits: &[u32]) -> u32 {
        let weight_start = digits.len() as u32 + 1;
        let sum: u32 = digits
            .iter()
            .enumerate()
            .map(|(i, d)| d * (weight_start - i as u32))
            .sum();
        let remainder = sum % 11;
        if remainder < 2 { 0 } else { 11 - remainder }
    }
}

impl Validator<str> for CpfValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        if value.len() != 11 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidCpf);
        }

        let digits: Vec<u32> = value.bytes().map(|b| u32::from(b - b'0')).collect();

        // A CPF of eleven identical digits passes the modulo check but is
        // not an assignable number.
        if digits.iter().all(|&d| d == digits[0]) {
            return Err(ValidationError::InvalidCpf);
        }

        if Self::verifier(&digits[..9]) != digits[9] || Self::verifier(&digits[..10]) != digits[10]
        {
            return Err(ValidationError::InvalidCpf);
        }

        Ok(())
    }
}

impl Default for CpfValidator {
    fn default() -> Self {
        Self::new()
    }
}
