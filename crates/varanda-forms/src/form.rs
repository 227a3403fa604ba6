//! Bound form state
//!
//! [`FormState`] pairs a compiled validator with the values a view has bound
//! so far. Its error map obeys one invariant: after any validation pass, a
//! field is keyed if and only if its current value fails. The map is rebuilt
//! from scratch on every pass and swapped in whole, so a stale message can
//! never survive an edit that fixed the field.

use crate::compiler::{CompiledForm, PipelineError, Validation};
use crate::schema::{FieldKind, FormSchema, Record};
use std::collections::{HashMap, HashSet};
use varanda_validators::{password_checklist, RequirementCheck};

/// Per-field view of the current state, for rendering.
///
/// For password fields, `checklist` carries the live all-rules evaluation
/// (every requirement's pass/fail state), while `error` still follows the
/// first-failing submit policy. Both derive from the same predicates.
#[derive(Debug)]
pub struct FieldDisplay<'a> {
	pub name: &'a str,
	pub label: Option<&'a str>,
	/// The value as currently bound (what the user typed).
	pub value: &'a serde_json::Value,
	/// Canonical masked rendering, for fields that carry a mask.
	pub masked: Option<String>,
	pub error: Option<&'a str>,
	pub touched: bool,
	pub checklist: Option<Vec<RequirementCheck>>,
}

/// Form values, error map, and touch tracking for one mounted view.
pub struct FormState {
	validator: CompiledForm,
	values: Record,
	defaults: Record,
	errors: HashMap<String, String>,
	touched: HashSet<String>,
}

impl FormState {
	/// Creates a state holding every field's zero value.
	///
	/// No validation has run yet: the error map starts empty and first
	/// reflects reality after the first edit or explicit pass.
	pub fn new(validator: CompiledForm) -> Self {
		let defaults = validator.schema().zero_record();
		Self {
			validator,
			values: defaults.clone(),
			defaults,
			errors: HashMap::new(),
			touched: HashSet::new(),
		}
	}

	/// Creates a state with caller-provided defaults (edit forms prefilled
	/// from the backend). Fields absent from `defaults` get zero values.
	pub fn with_defaults(validator: CompiledForm, defaults: Record) -> Self {
		let mut merged = validator.schema().zero_record();
		merged.extend(defaults);
		Self {
			validator,
			values: merged.clone(),
			defaults: merged,
			errors: HashMap::new(),
			touched: HashSet::new(),
		}
	}

	pub fn schema(&self) -> &FormSchema {
		self.validator.schema()
	}

	pub fn values(&self) -> &Record {
		&self.values
	}

	pub fn value(&self, field: &str) -> Option<&serde_json::Value> {
		self.values.get(field)
	}

	pub fn errors(&self) -> &HashMap<String, String> {
		&self.errors
	}

	pub fn error(&self, field: &str) -> Option<&str> {
		self.errors.get(field).map(String::as_str)
	}

	pub fn is_touched(&self, field: &str) -> bool {
		self.touched.contains(field)
	}

	/// Binds one field's value (a keystroke or selection) and re-runs the
	/// whole validation pass, replacing the error map atomically.
	pub fn set_value(
		&mut self,
		field: impl Into<String>,
		value: serde_json::Value,
	) -> Result<(), PipelineError> {
		let name = field.into();
		self.touched.insert(name.clone());
		self.values.insert(name, value);
		self.refresh_errors()
	}

	/// Runs a full validation pass, updates the error map, and returns the
	/// outcome. This is the submit-attempt entry point.
	pub fn validate(&mut self) -> Result<Validation, PipelineError> {
		let validation = self.validator.validate(&self.values)?;
		self.errors = match &validation {
			Validation::Valid(_) => HashMap::new(),
			Validation::Invalid(errors) => errors.clone(),
		};
		Ok(validation)
	}

	/// Restores defaults and clears errors and touch state, as after a
	/// successful submit or a view remount.
	pub fn reset(&mut self) {
		self.values = self.defaults.clone();
		self.errors.clear();
		self.touched.clear();
	}

	/// Rendering view of one field.
	pub fn display(&self, field: &str) -> Option<FieldDisplay<'_>> {
		let schema = self.validator.schema().get_field(field)?;
		let value = self.values.get(field)?;

		let masked = schema.mask.map(|mask| {
			let raw = match value.as_str() {
				Some(display) => mask.strip(display),
				None => value.clone(),
			};
			mask.format(&raw)
		});

		let checklist = match schema.kind {
			FieldKind::Password => Some(password_checklist(value.as_str().unwrap_or(""))),
			_ => None,
		};

		Some(FieldDisplay {
			name: &schema.name,
			label: schema.label.as_deref(),
			value,
			masked,
			error: self.error(field),
			touched: self.is_touched(field),
			checklist,
		})
	}

	fn refresh_errors(&mut self) -> Result<(), PipelineError> {
		self.validate().map(|_| ())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::{FieldSchema, FormSchema, MaskKind};
	use serde_json::json;

	fn signup_like() -> CompiledForm {
		let schema = FormSchema::new("signup")
			.field(FieldSchema::new("name", FieldKind::Text).required("Enter your name"))
			.field(
				FieldSchema::new("email", FieldKind::Email)
					.required("Enter your email address")
					.email("Enter a valid email address"),
			)
			.field(FieldSchema::new("password", FieldKind::Password).password_policy());
		CompiledForm::compile(schema).expect("static schema compiles")
	}

	#[test]
	fn test_new_state_holds_zero_values_without_errors() {
		let state = FormState::new(signup_like());

		assert_eq!(state.value("name"), Some(&json!("")));
		assert_eq!(state.value("email"), Some(&json!("")));
		assert!(state.errors().is_empty());
		assert!(!state.is_touched("name"));
	}

	#[test]
	fn test_set_value_revalidates_everything() {
		let mut state = FormState::new(signup_like());

		state.set_value("email", json!("not-an-email")).unwrap();

		// The touched field has its error, and untouched failing fields
		// are reported too: the map mirrors current validity, not history
		assert_eq!(state.error("email"), Some("Enter a valid email address"));
		assert_eq!(state.error("name"), Some("Enter your name"));
	}

	#[test]
	fn test_fixing_a_field_clears_exactly_its_error() {
		let mut state = FormState::new(signup_like());
		state.set_value("email", json!("bad")).unwrap();
		assert!(state.error("email").is_some());

		state.set_value("email", json!("resident@example.com")).unwrap();

		assert!(state.error("email").is_none());
		assert!(state.error("name").is_some());
	}

	#[test]
	fn test_reset_restores_defaults() {
		let mut state = FormState::new(signup_like());
		state.set_value("name", json!("Alice")).unwrap();
		state.set_value("email", json!("a@b.com")).unwrap();

		state.reset();

		assert_eq!(state.value("name"), Some(&json!("")));
		assert!(state.errors().is_empty());
		assert!(!state.is_touched("name"));
	}

	#[test]
	fn test_with_defaults_merges_zero_values() {
		let schema = FormSchema::new("profile")
			.field(FieldSchema::new("name", FieldKind::Text).required("Enter your name"))
			.field(FieldSchema::new("phone", FieldKind::Text));
		let compiled = CompiledForm::compile(schema).unwrap();

		let state = FormState::with_defaults(
			compiled,
			Record::from_iter([("name".to_string(), json!("Alice"))]),
		);

		assert_eq!(state.value("name"), Some(&json!("Alice")));
		assert_eq!(state.value("phone"), Some(&json!("")));
	}

	#[test]
	fn test_display_masks_and_checklist() {
		let schema = FormSchema::new("mixed")
			.field(
				FieldSchema::new("postal_code", FieldKind::Text)
					.masked(MaskKind::PostalCode)
					.exact_length(8, "Enter a full postal code"),
			)
			.field(FieldSchema::new("password", FieldKind::Password).password_policy());
		let mut state = FormState::new(CompiledForm::compile(schema).unwrap());

		state.set_value("postal_code", json!("04538133")).unwrap();
		state.set_value("password", json!("secret1")).unwrap();

		let postal = state.display("postal_code").unwrap();
		assert_eq!(postal.masked.as_deref(), Some("04538-133"));
		assert!(postal.checklist.is_none());

		// The live checklist evaluates all four rules; "secret1" passes
		// length and digit, fails uppercase and symbol
		let password = state.display("password").unwrap();
		let checks = password.checklist.unwrap();
		assert_eq!(checks.iter().filter(|c| c.satisfied).count(), 2);
		assert_eq!(checks.iter().filter(|c| !c.satisfied).count(), 2);
		// The submit-path error is still the first failing rule only
		assert_eq!(
			password.error,
			Some("Password must contain an uppercase letter")
		);
	}
}
