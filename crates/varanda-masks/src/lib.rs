//! Display masks for Varanda form fields
//!
//! Several portal fields store a raw value internally but render a masked
//! representation: phone numbers, CPF, postal codes (CEP), and currency
//! amounts. This crate provides the `mask`/`unmask` pairs with the contract:
//!
//! - `apply(strip(display)) == display` for every well-formed display value;
//! - `strip(apply(raw)) == raw` for every valid raw value;
//! - `strip` never fails: a partially typed mask strips to a short digit
//!   string, which the validation layer rejects with a length constraint.
//!
//! Validation always runs on the stripped value; the masked form is for
//! display only and is never sent onward in a payload.

pub mod currency;
pub mod document;
pub mod phone;
pub mod postal;

pub use currency::CurrencyMask;
pub use document::CpfMask;
pub use phone::PhoneMask;
pub use postal::PostalCodeMask;

/// A display mask over a digit-string raw value.
pub trait Mask {
	/// Formats a raw value for display. A raw value of unexpected length is
	/// returned as its bare digits rather than padded or truncated.
	fn apply(&self, raw: &str) -> String;

	/// Recovers the raw value from a (possibly partial) display string.
	fn strip(&self, display: &str) -> String;
}

/// Keeps only ASCII digits from the input.
pub(crate) fn digits(input: &str) -> String {
	input.chars().filter(|c| c.is_ascii_digit()).collect()
}
