//! Concrete portal form schemas
//!
//! One constructor per view-owned form, each returning plain [`FormSchema`]
//! metadata. Messages live in [`messages`] so scenario tests and views quote
//! the same strings.

use crate::schema::{CrossFieldRule, FieldKind, FieldSchema, FormSchema, MaskKind};

/// User-facing validation messages, one constant per rule.
pub mod messages {
	pub const NAME_REQUIRED: &str = "Enter your name";
	pub const EMAIL_REQUIRED: &str = "Enter your email address";
	pub const EMAIL_INVALID: &str = "Enter a valid email address";
	pub const PASSWORD_REQUIRED: &str = "Enter your password";
	pub const PASSWORD_CONFIRMATION_REQUIRED: &str = "Confirm your password";
	pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
	pub const BIRTH_DATE_REQUIRED: &str = "Enter your birth date";
	pub const BIRTH_DATE_INVALID: &str = "Enter a valid date";
	pub const UNDER_MINIMUM_AGE: &str = "You must be at least 18 years old";
	pub const TERMS_NOT_ACCEPTED: &str = "You must accept the terms of use";
	pub const POST_EMPTY: &str = "Write something or attach a file";
	pub const POST_TOO_LONG: &str = "Keep posts under 500 characters";
	pub const POSTAL_CODE_REQUIRED: &str = "Enter your postal code";
	pub const POSTAL_CODE_INCOMPLETE: &str = "Enter a full postal code";
	pub const STREET_REQUIRED: &str = "Enter your street";
	pub const STREET_NUMBER_REQUIRED: &str = "Enter the street number";
	pub const CITY_REQUIRED: &str = "Enter your city";
	pub const STATE_INVALID: &str = "Enter the two-letter state code";
	pub const PHONE_INCOMPLETE: &str = "Enter a full phone number";
	pub const CPF_REQUIRED: &str = "Enter your CPF";
	pub const CPF_INVALID: &str = "Enter a valid CPF";
}

/// Resident signup: identity, credentials, age gate, and terms consent.
pub fn signup() -> FormSchema {
	FormSchema::new("signup")
		.field(
			FieldSchema::new("name", FieldKind::Text)
				.with_label("Full name")
				.required(messages::NAME_REQUIRED),
		)
		.field(
			FieldSchema::new("email", FieldKind::Email)
				.with_label("Email")
				.required(messages::EMAIL_REQUIRED)
				.email(messages::EMAIL_INVALID),
		)
		.field(
			FieldSchema::new("password", FieldKind::Password)
				.with_label("Password")
				.required(messages::PASSWORD_REQUIRED)
				.password_policy(),
		)
		.field(
			FieldSchema::new("birth_date", FieldKind::Date)
				.with_label("Birth date")
				.required(messages::BIRTH_DATE_REQUIRED)
				.valid_date(messages::BIRTH_DATE_INVALID)
				.minimum_age(18, messages::UNDER_MINIMUM_AGE),
		)
		.field(
			FieldSchema::new("agreed_with_terms", FieldKind::Boolean)
				.with_label("I agree with the terms of use")
				.accepted(messages::TERMS_NOT_ACCEPTED),
		)
}

/// Login: credentials only; the password policy is not re-checked here.
pub fn login() -> FormSchema {
	FormSchema::new("login")
		.field(
			FieldSchema::new("email", FieldKind::Email)
				.with_label("Email")
				.required(messages::EMAIL_REQUIRED)
				.email(messages::EMAIL_INVALID),
		)
		.field(
			FieldSchema::new("password", FieldKind::Password)
				.with_label("Password")
				.required(messages::PASSWORD_REQUIRED),
		)
}

/// New password after a reset link: full policy plus confirmation.
pub fn new_password() -> FormSchema {
	FormSchema::new("new_password")
		.field(
			FieldSchema::new("password", FieldKind::Password)
				.with_label("New password")
				.required(messages::PASSWORD_REQUIRED)
				.password_policy(),
		)
		.field(
			FieldSchema::new("password_confirmation", FieldKind::Password)
				.with_label("Confirm new password")
				.required(messages::PASSWORD_CONFIRMATION_REQUIRED),
		)
		.rule(CrossFieldRule::FieldsEqual {
			fields: vec!["password".into(), "password_confirmation".into()],
			target_field: "password_confirmation".into(),
			message: messages::PASSWORDS_DO_NOT_MATCH.into(),
		})
}

/// Delivery address of the resident's unit.
pub fn address() -> FormSchema {
	FormSchema::new("address")
		.field(
			FieldSchema::new("postal_code", FieldKind::Text)
				.with_label("Postal code")
				.masked(MaskKind::PostalCode)
				.required(messages::POSTAL_CODE_REQUIRED)
				.exact_length(8, messages::POSTAL_CODE_INCOMPLETE),
		)
		.field(
			FieldSchema::new("street", FieldKind::Text)
				.with_label("Street")
				.required(messages::STREET_REQUIRED),
		)
		.field(
			FieldSchema::new("number", FieldKind::Text)
				.with_label("Number")
				.required(messages::STREET_NUMBER_REQUIRED),
		)
		.field(FieldSchema::new("complement", FieldKind::Text).with_label("Complement"))
		.field(
			FieldSchema::new("city", FieldKind::Text)
				.with_label("City")
				.required(messages::CITY_REQUIRED),
		)
		.field(
			FieldSchema::new("state", FieldKind::Text)
				.with_label("State")
				.required(messages::STATE_INVALID)
				.pattern("^[A-Za-z]{2}$", messages::STATE_INVALID),
		)
}

/// Profile edit: display identity plus contact and document fields.
pub fn profile() -> FormSchema {
	FormSchema::new("profile")
		.field(
			FieldSchema::new("name", FieldKind::Text)
				.with_label("Full name")
				.required(messages::NAME_REQUIRED),
		)
		.field(
			// Optional: residents may leave the phone blank, but a partial
			// number is rejected.
			FieldSchema::new("phone", FieldKind::Text)
				.with_label("Phone")
				.masked(MaskKind::Phone)
				.min_length(10, messages::PHONE_INCOMPLETE)
				.max_length(11, messages::PHONE_INCOMPLETE),
		)
		.field(
			FieldSchema::new("cpf", FieldKind::Text)
				.with_label("CPF")
				.masked(MaskKind::Cpf)
				.required(messages::CPF_REQUIRED)
				.exact_length(11, messages::CPF_INVALID)
				.cpf(messages::CPF_INVALID),
		)
}

/// Post composition: text, attachments, and the at-least-one-of rule.
pub fn post_composer() -> FormSchema {
	FormSchema::new("post_composer")
		.field(
			FieldSchema::new("text", FieldKind::Text)
				.with_label("What's happening in the building?")
				.max_length(500, messages::POST_TOO_LONG),
		)
		.field(FieldSchema::new("attachments", FieldKind::File))
		.rule(CrossFieldRule::AnyOf {
			fields: vec!["text".into(), "attachments".into()],
			target_field: "text".into(),
			message: messages::POST_EMPTY.into(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::compiler::CompiledForm;

	#[test]
	fn test_every_schema_compiles() {
		for schema in [
			signup(),
			login(),
			new_password(),
			address(),
			profile(),
			post_composer(),
		] {
			let name = schema.name.clone();
			assert!(
				CompiledForm::compile(schema).is_ok(),
				"schema '{name}' failed to compile"
			);
		}
	}

	#[test]
	fn test_signup_password_policy_order() {
		let schema = signup();
		let password = schema.get_field("password").unwrap();

		// Required first, then the four policy rules in reporting order
		assert_eq!(password.constraints.len(), 5);
		assert_eq!(
			password.constraints[0].message(),
			messages::PASSWORD_REQUIRED
		);
		assert_eq!(
			password.constraints[1].message(),
			"Password must be at least 6 characters"
		);
	}
}
