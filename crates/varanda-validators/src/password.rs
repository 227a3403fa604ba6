//! Resident password policy
//!
//! The portal's password rules are four independent requirements. Two display
//! modes consume them:
//!
//! - the submit path ([`PasswordValidator`]) reports only the first unmet
//!   requirement, matching the first-failing-constraint policy of the rest of
//!   the form pipeline;
//! - the live checklist ([`password_checklist`]) evaluates every requirement
//!   so the UI can show pass/fail state per rule while the user types.
//!
//! Both paths are built on [`PasswordRequirement::is_satisfied_by`], so the
//! two modes can never drift apart.

use crate::{ValidationError, ValidationResult, Validator};
use serde::{Deserialize, Serialize};

/// Minimum password length required by [`PasswordRequirement::MinLength`].
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// One rule of the password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRequirement {
    /// At least [`PASSWORD_MIN_LENGTH`] characters.
    MinLength,
    /// At least one character in `[A-Z]`.
    UppercaseLetter,
    /// At least one character in `[0-9]`.
    Digit,
    /// At least one character outside `[A-Za-z0-9]`.
    Symbol,
}

impl PasswordRequirement {
    /// All requirements, in the order they are reported on submit.
    pub const ALL: [PasswordRequirement; 4] = [
        PasswordRequirement::MinLength,
        PasswordRequirement::UppercaseLetter,
        PasswordRequirement::Digit,
        PasswordRequirement::Symbol,
    ];

    /// Checks this single requirement against a candidate password.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::PasswordRequirement;
    ///
    /// assert!(PasswordRequirement::UppercaseLetter.is_satisfied_by("Abc"));
    /// assert!(!PasswordRequirement::UppercaseLetter.is_satisfied_by("abc"));
    /// assert!(PasswordRequirement::Symbol.is_satisfied_by("ab!"));
    /// ```
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        match self {
            PasswordRequirement::MinLength => value.chars().count() >= PASSWORD_MIN_LENGTH,
            PasswordRequirement::UppercaseLetter => {
                value.chars().any(|c| c.is_ascii_uppercase())
            }
            PasswordRequirement::Digit => value.chars().any(|c| c.is_ascii_digit()),
            PasswordRequirement::Symbol => value.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    /// The user-facing message shown when this requirement is unmet.
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRequirement::MinLength => "Password must be at least 6 characters",
            PasswordRequirement::UppercaseLetter => "Password must contain an uppercase letter",
            PasswordRequirement::Digit => "Password must contain a number",
            PasswordRequirement::Symbol => "Password must contain a symbol",
        }
    }
}

/// Submit-path password validator: reports the first unmet requirement.
///
/// # Examples
///
/// ```
/// use varanda_validators::{PasswordValidator, Validator};
///
/// let validator = PasswordValidator::new();
/// assert!(validator.validate("Secret1!").is_ok());
/// assert!(validator.validate("secret1!").is_err()); // no uppercase
/// ```
#[derive(Debug, Clone)]
pub struct PasswordValidator;

impl PasswordValidator {
    /// Creates a new `PasswordValidator`.
    pub fn new() -> Self {
        Self
    }

    /// Returns the first requirement `value` fails, in [`PasswordRequirement::ALL`] order.
    ///
    /// # Examples
    ///
    /// ```
    /// use varanda_validators::{PasswordRequirement, PasswordValidator};
    ///
    /// // "abc" is under length, so length is reported before the other gaps
    /// assert_eq!(
    ///     PasswordValidator::first_unmet("abc"),
    ///     Some(PasswordRequirement::MinLength)
    /// );
    /// assert_eq!(PasswordValidator::first_unmet("Secret1!"), None);
    /// ```
    pub fn first_unmet(value: &str) -> Option<PasswordRequirement> {
        PasswordRequirement::ALL
            .into_iter()
            .find(|requirement| !requirement.is_satisfied_by(value))
    }
}

impl Validator<str> for PasswordValidator {
    fn validate(&self, value: &str) -> ValidationResult<()> {
        match Self::first_unmet(value) {
            None => Ok(()),
            Some(requirement) => Err(ValidationError::PasswordRule(requirement)),
        }
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pass/fail state of one requirement, for the live checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementCheck {
    pub requirement: PasswordRequirement,
    pub satisfied: bool,
}

/// Evaluates every password requirement, without short-circuiting.
///
/// The returned list always has one entry per requirement, in
/// [`PasswordRequirement::ALL`] order.
///
/// # Examples
///
/// ```
/// use varanda_validators::password_checklist;
///
/// let checks = password_checklist("secret1");
/// let failing: Vec<_> = checks.iter().filter(|c| !c.satisfied).collect();
/// // "secret1" is long enough and has a digit, but lacks uppercase and symbol
/// assert_eq!(failing.len(), 2);
/// ```
pub fn password_checklist(value: &str) -> Vec<RequirementCheck> {
    PasswordRequirement::ALL
        .into_iter()
        .map(|requirement| RequirementCheck {
            satisfied: requirement.is_satisfied_by(value),
            requirement,
        })
        .collect()
}
