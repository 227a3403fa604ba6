//! Value validators for the Varanda condominium portal
//!
//! This crate provides the reusable validators behind the portal's form
//! pipeline: string length and pattern checks, email format, numeric ranges,
//! the resident password policy, birth-date/minimum-age rules, and CPF
//! check-digit verification.
//!
//! Validators are small structs implementing [`Validator`]. They report
//! failures through [`ValidationError`], whose `Display` strings are the
//! user-facing messages.

pub mod date;
pub mod document;
pub mod email;
pub mod errors;
pub mod numeric;
pub mod password;
pub mod string;

pub use date::{DateValidator, MinimumAgeValidator};
pub use document::CpfValidator;
pub use email::EmailValidator;
pub use errors::{ValidationError, ValidationResult};
pub use numeric::{MaxValueValidator, MinValueValidator, RangeValidator};
pub use password::{
    password_checklist, PasswordRequirement, PasswordValidator, RequirementCheck,
    PASSWORD_MIN_LENGTH,
};
pub use string::{
    ExactLengthValidator, MaxLengthValidator, MinLengthValidator, RegexValidator,
    RequiredValidator,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::date::*;
    pub use crate::document::*;
    pub use crate::email::*;
    pub use crate::errors::*;
    pub use crate::numeric::*;
    pub use crate::password::*;
    pub use crate::string::*;
    pub use crate::Validator;
}

/// Trait for validators
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T) -> ValidationResult<()>;
}
