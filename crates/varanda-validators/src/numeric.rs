//! Numeric validators

use crate::{ValidationError, ValidationResult, Validator};

/// Minimum value validator
pub struct MinValueValidator {
    min: f64,
}

impl MinValueValidator {
    /// Creates a new MinValueValidator with the specified minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{MinValueValidator, Validator};
    ///
    /// let validator = MinValueValidator::new(0.0);
    /// assert!(validator.validate(&10.0).is_ok());
    /// assert!(validator.validate(&-1.0).is_err());
    /// ```
    pub fn new(min: f64) -> Self {
        Self { min }
    }
}

impl Validator<f64> for MinValueValidator {
    fn validate(&self, value: &f64) -> ValidationResult<()> {
        if *value >= self.min {
            Ok(())
        } else {
            Err(ValidationError::BelowMinimum { min: self.min })
        }
    }
}

/// Maximum value validator
pub struct MaxValueValidator {
    max: f64,
}

impl MaxValueValidator {
    /// Creates a new MaxValueValidator with the specified maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{MaxValueValidator, Validator};
    ///
    /// let validator = MaxValueValidator::new(100.0);
    /// assert!(validator.validate(&50.0).is_ok());
    /// assert!(validator.validate(&150.0).is_err());
    /// ```
    pub fn new(max: f64) -> Self {
        Self { max }
    }
}

impl Validator<f64> for MaxValueValidator {
    fn validate(&self, value: &f64) -> ValidationResult<()> {
        if *value <= self.max {
            Ok(())
        } else {
            Err(ValidationError::AboveMaximum { max: self.max })
        }
    }
}

/// Range validator combining a minimum and a maximum bound.
pub struct RangeValidator {
    min: f64,
    max: f64,
}

impl RangeValidator {
    /// Creates a new RangeValidator with inclusive bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{RangeValidator, Validator};
    ///
    /// let validator = RangeValidator::new(0.0, 100.0);
    /// assert!(validator.validate(&0.0).is_ok());
    /// assert!(validator.validate(&100.0).is_ok());
    /// assert!(validator.validate(&101.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Validator<f64> for RangeValidator {
    fn validate(&self, value: &f64) -> ValidationResult<()> {
        if *value < self.min {
            Err(ValidationError::BelowMinimum { min: self.min })
        } else if *value > self.max {
            Err(ValidationError::AboveMaximum { max: self.max })
        } else {
            Ok(())
        }
    }
}
