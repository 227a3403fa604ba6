//! Date and minimum-age validators

use crate::{ValidationError, ValidationResult, Validator};
use chrono::{Datelike, NaiveDate, Utc};

/// Validates and parses ISO 8601 (`YYYY-MM-DD`) date input.
///
/// An unparseable value is reported with the generic invalid-date message,
/// distinct from the age-requirement message of [`MinimumAgeValidator`].
#[derive(Debug, Clone)]
pub struct DateValidator;

impl DateValidator {
    /// Creates a new `DateValidator`.
    pub fn new() -> Self {
        Self
    }

    /// Parses a date string, trimming surrounding whitespace.
    ///
    /// Years outside the 4-digit range (1000-9999) are rejected to prevent
    /// ambiguous 2-digit year interpretations.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::DateValidator;
    /// use chrono::NaiveDate;
    ///
    /// let date = DateValidator::parse("1990-04-12").unwrap();
    /// assert_eq!(date, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());
    /// assert!(DateValidator::parse("not a date").is_err());
    /// assert!(DateValidator::parse("90-04-12").is_err());
    /// ```
    pub fn parse(value: &str) -> ValidationResult<NaiveDate> {
        let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate)?;
        if !(1000..=9999).contains(&date.year()) {
            return Err(ValidationError::InvalidDate);
        }
        Ok(date)
    }
}

impl Validator<str> for DateValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        Self::parse(value).map(|_| ())
    }
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates that a birth date is at least `years` whole years in the past.
///
/// The comparison is against "now" sampled at validation time, not at form
/// construction time. The core comparison is [`MinimumAgeValidator::check`],
/// a pure function of `(birth, on)` so the boundary is testable without
/// clock control.
#[derive(Debug, Clone)]
pub struct MinimumAgeValidator {
    years: u32,
}

impl MinimumAgeValidator {
    /// Creates a validator requiring at least `years` whole years of age.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::MinimumAgeValidator;
    /// use chrono::NaiveDate;
    ///
    /// let validator = MinimumAgeValidator::new(18);
    /// let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
    ///
    /// // Exactly 18 years before today is old enough
    /// let boundary = NaiveDate::from_ymd_opt(2008, 8, 7).unwrap();
    /// assert!(validator.check(boundary, today).is_ok());
    ///
    /// // One day short of 18 years is not
    /// let one_day_short = NaiveDate::from_ymd_opt(2008, 8, 8).unwrap();
    /// assert!(validator.check(one_day_short, today).is_err());
    /// ```
    pub fn new(years: u32) -> Self {
        Self { years }
    }

    /// Pure comparison core: is `birth` at least `self.years` whole years
    /// before `on`? A birth date after `on` never satisfies the requirement.
    pub fn check(&self, birth: NaiveDate, on: NaiveDate) -> ValidationResult<()> {
        match on.years_since(birth) {
            Some(age) if age >= self.years => Ok(()),
            _ => Err(ValidationError::BelowMinimumAge { years: self.years }),
        }
    }
}

impl Validator<NaiveDate> for MinimumAgeValidator {
    fn validate(&self, value: &NaiveDate) -> ValidationResult<()> {
        self.check(*value, Utc::now().date_naive())
    }
}

impl Validator<str> for MinimumAgeValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        let birth = DateValidator::parse(value)?;
        self.check(birth, Utc::now().date_naive())
    }
}
