//! CPF display mask

use crate::{digits, Mask};

/// Mask for CPF numbers: 11 digits render as `123.456.789-09`.
///
/// Check-digit validation is the job of `varanda-validators`; this mask only
/// moves between the raw digit string and the display form.
///
/// # Examples
///
/// ```
/// use varanda_masks::{CpfMask, Mask};
///
/// assert_eq!(CpfMask.apply("52998224725"), "529.982.247-25");
/// assert_eq!(CpfMask.strip("529.982.247-25"), "52998224725");
/// assert_eq!(CpfMask.strip("529.98"), "52998");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CpfMask;

impl Mask for CpfMask {
	fn apply(&self, raw: &str) -> String {
		let raw = digits(raw);
		if raw.len() == 11 {
			format!("{}.{}.{}-{}", &raw[..3], &raw[3..6], &raw[6..9], &raw[9..])
		} else {
			raw
		}
	}

	fn strip(&self, display: &str) -> String {
		digits(display)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("52998224725", "529.982.247-25")]
	#[case("12345678909", "123.456.789-09")]
	fn test_cpf_apply(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(CpfMask.apply(raw), expected);
	}

	#[rstest]
	#[case("529.982.247-25", "52998224725")]
	#[case("529.982", "529982")]
	#[case("", "")]
	fn test_cpf_strip(#[case] display: &str, #[case] expected: &str) {
		assert_eq!(CpfMask.strip(display), expected);
	}
}
