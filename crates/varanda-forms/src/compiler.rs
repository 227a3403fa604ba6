//! Schema compiler and validation pass
//!
//! [`CompiledForm`] turns the declarative metadata of a [`FormSchema`] into
//! an executable validator. Compilation is where patterns are parsed, so a
//! malformed regex surfaces as a [`PipelineError`] once, up front, instead of
//! failing every validation pass.
//!
//! One pass over a record works in two stages:
//!
//! 1. per-field constraints, in declaration order, first failing message
//!    wins for its field;
//! 2. cross-field rules and record refinements, which only attach their
//!    message to a target field that is still valid.
//!
//! Validation failures are data ([`Validation::Invalid`]); only internal
//! errors (a refinement that errors out) use the `Err` channel, so callers
//! can never mistake a programmer error for user input.

use crate::schema::{Constraint, CrossFieldRule, FieldKind, FieldSchema, FormSchema, Record};
use chrono::Utc;
use regex::Regex;
use std::collections::HashMap;
use varanda_validators::{
	CpfValidator, DateValidator, EmailValidator, ExactLengthValidator, MaxLengthValidator,
	MaxValueValidator, MinLengthValidator, MinValueValidator, MinimumAgeValidator, Validator,
};

/// Result of one custom refinement.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintOutcome {
	Pass,
	Fail(String),
}

type FieldRefinement =
	Box<dyn Fn(&serde_json::Value) -> anyhow::Result<ConstraintOutcome> + Send + Sync>;
type RecordRefinement = Box<dyn Fn(&Record) -> anyhow::Result<ConstraintOutcome> + Send + Sync>;

/// Fatal pipeline errors, distinct from validation failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
	#[error("invalid pattern on field `{field}`: {source}")]
	BadPattern { field: String, source: regex::Error },

	#[error("internal error while validating `{field}`: {reason}")]
	Internal { field: String, reason: anyhow::Error },
}

/// Outcome of a validation pass. Exactly one variant is populated: the
/// normalized record when everything holds, or one message per failing field.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
	Valid(Record),
	Invalid(HashMap<String, String>),
}

impl Validation {
	pub fn is_valid(&self) -> bool {
		matches!(self, Validation::Valid(_))
	}

	pub fn errors(&self) -> Option<&HashMap<String, String>> {
		match self {
			Validation::Valid(_) => None,
			Validation::Invalid(errors) => Some(errors),
		}
	}

	pub fn record(&self) -> Option<&Record> {
		match self {
			Validation::Valid(record) => Some(record),
			Validation::Invalid(_) => None,
		}
	}

	pub fn into_record(self) -> Option<Record> {
		match self {
			Validation::Valid(record) => Some(record),
			Validation::Invalid(_) => None,
		}
	}
}

/// An executable validator compiled from a [`FormSchema`].
pub struct CompiledForm {
	schema: FormSchema,
	regexes: HashMap<(usize, usize), Regex>,
	field_refinements: HashMap<String, Vec<FieldRefinement>>,
	record_refinements: Vec<(String, RecordRefinement)>,
}

impl CompiledForm {
	/// Compiles a schema, parsing every `Pattern` constraint eagerly.
	///
	/// # Examples
	///
	/// ```
	/// use varanda_forms::{CompiledForm, FieldKind, FieldSchema, FormSchema};
	///
	/// let schema = FormSchema::new("unit")
	///     .field(FieldSchema::new("block", FieldKind::Text).pattern("^[A-D]$", "Unknown block"));
	/// assert!(CompiledForm::compile(schema).is_ok());
	///
	/// let broken = FormSchema::new("unit")
	///     .field(FieldSchema::new("block", FieldKind::Text).pattern("[unclosed", "Unknown block"));
	/// assert!(CompiledForm::compile(broken).is_err());
	/// ```
	pub fn compile(schema: FormSchema) -> Result<Self, PipelineError> {
		let mut regexes = HashMap::new();
		for (fi, field) in schema.fields.iter().enumerate() {
			for (ci, constraint) in field.constraints.iter().enumerate() {
				if let Constraint::Pattern { pattern, .. } = constraint {
					let regex = Regex::new(pattern).map_err(|source| PipelineError::BadPattern {
						field: field.name.clone(),
						source,
					})?;
					regexes.insert((fi, ci), regex);
				}
			}
		}

		Ok(Self {
			schema,
			regexes,
			field_refinements: HashMap::new(),
			record_refinements: vec![],
		})
	}

	/// The schema this validator was compiled from.
	pub fn schema(&self) -> &FormSchema {
		&self.schema
	}

	/// Registers a custom refinement on one field, run after the field's
	/// declarative constraints pass. Refinements must be pure; an `Err`
	/// return is treated as a programmer error and aborts the pass.
	pub fn add_field_refinement<F>(&mut self, field: impl Into<String>, refinement: F)
	where
		F: Fn(&serde_json::Value) -> anyhow::Result<ConstraintOutcome> + Send + Sync + 'static,
	{
		self.field_refinements
			.entry(field.into())
			.or_default()
			.push(Box::new(refinement));
	}

	/// Registers a custom predicate over the whole record, attributed to
	/// `target_field`, run after the declarative cross-field rules.
	pub fn add_record_refinement<F>(&mut self, target_field: impl Into<String>, refinement: F)
	where
		F: Fn(&Record) -> anyhow::Result<ConstraintOutcome> + Send + Sync + 'static,
	{
		self.record_refinements
			.push((target_field.into(), Box::new(refinement)));
	}

	/// Runs one full validation pass over `record`.
	///
	/// Missing fields are evaluated as their kind's zero value. Masked
	/// fields are stripped before their constraints run, and the normalized
	/// record carries the stripped value. The returned error map is built
	/// from scratch on every call; it never carries state over from a
	/// previous pass.
	pub fn validate(&self, record: &Record) -> Result<Validation, PipelineError> {
		let mut errors: HashMap<String, String> = HashMap::new();
		let mut normalized = Record::new();

		for (fi, field) in self.schema.fields.iter().enumerate() {
			// An explicit null is treated like a missing field: both become
			// the kind's zero value.
			let raw = record
				.get(&field.name)
				.filter(|v| !v.is_null())
				.cloned()
				.unwrap_or_else(|| field.kind.zero_value());
			let value = normalize(field, raw);

			if let Some(message) = self.field_error(fi, field, &value)? {
				errors.insert(field.name.clone(), message);
			}
			normalized.insert(field.name.clone(), value);
		}

		// Cross-field rules run after every per-field constraint and lose
		// to an existing per-field error on the same target.
		for rule in &self.schema.rules {
			if errors.contains_key(rule.target_field()) {
				continue;
			}
			if let Some(message) = rule_failure(rule, &normalized) {
				errors.insert(rule.target_field().to_string(), message);
			}
		}

		for (target, refinement) in &self.record_refinements {
			if errors.contains_key(target) {
				continue;
			}
			let outcome = refinement(&normalized).map_err(|reason| PipelineError::Internal {
				field: target.clone(),
				reason,
			})?;
			if let ConstraintOutcome::Fail(message) = outcome {
				errors.insert(target.clone(), message);
			}
		}

		if errors.is_empty() {
			Ok(Validation::Valid(normalized))
		} else {
			Ok(Validation::Invalid(errors))
		}
	}

	/// First failing constraint's message for one field, or `None`.
	///
	/// An empty value is gated only by a `Required` constraint; the
	/// remaining constraints apply to non-empty input, so optional fields
	/// stay valid when left blank.
	fn field_error(
		&self,
		fi: usize,
		field: &FieldSchema,
		value: &serde_json::Value,
	) -> Result<Option<String>, PipelineError> {
		if is_empty_value(value) {
			let required = field.constraints.iter().find_map(|c| match c {
				Constraint::Required { message } => Some(message.clone()),
				_ => None,
			});
			return Ok(required);
		}

		for (ci, constraint) in field.constraints.iter().enumerate() {
			if !self.constraint_holds(fi, ci, constraint, value) {
				return Ok(Some(constraint.message().to_string()));
			}
		}

		if let Some(refinements) = self.field_refinements.get(&field.name) {
			for refinement in refinements {
				let outcome = refinement(value).map_err(|reason| PipelineError::Internal {
					field: field.name.clone(),
					reason,
				})?;
				if let ConstraintOutcome::Fail(message) = outcome {
					return Ok(Some(message));
				}
			}
		}

		Ok(None)
	}

	fn constraint_holds(
		&self,
		fi: usize,
		ci: usize,
		constraint: &Constraint,
		value: &serde_json::Value,
	) -> bool {
		let text = value.as_str().unwrap_or("");
		match constraint {
			// Emptiness is handled before ordered evaluation; a value that
			// reaches this point is present.
			Constraint::Required { .. } => true,
			Constraint::MinLength { min, .. } => {
				MinLengthValidator::new(*min).validate(text).is_ok()
			}
			Constraint::MaxLength { max, .. } => {
				MaxLengthValidator::new(*max).validate(text).is_ok()
			}
			Constraint::ExactLength { length, .. } => {
				ExactLengthValidator::new(*length).validate(text).is_ok()
			}
			Constraint::Pattern { .. } => self
				.regexes
				.get(&(fi, ci))
				.expect("pattern compiled at schema compile time")
				.is_match(text),
			Constraint::MinValue { min, .. } => value
				.as_f64()
				.is_some_and(|v| MinValueValidator::new(*min).validate(&v).is_ok()),
			Constraint::MaxValue { max, .. } => value
				.as_f64()
				.is_some_and(|v| MaxValueValidator::new(*max).validate(&v).is_ok()),
			Constraint::Email { .. } => EmailValidator::new().validate(text).is_ok(),
			Constraint::ValidDate { .. } => DateValidator::parse(text).is_ok(),
			Constraint::MinimumAge { years, .. } => DateValidator::parse(text)
				.is_ok_and(|birth| {
					MinimumAgeValidator::new(*years)
						.check(birth, Utc::now().date_naive())
						.is_ok()
				}),
			Constraint::Accepted { .. } => value.as_bool() == Some(true),
			Constraint::Cpf { .. } => CpfValidator::new().validate(text).is_ok(),
			Constraint::Password { requirement } => requirement.is_satisfied_by(text),
		}
	}
}

/// Strips the display mask (when present) and trims text-like values.
/// Passwords are never trimmed: trailing spaces are part of the secret.
fn normalize(field: &FieldSchema, raw: serde_json::Value) -> serde_json::Value {
	let raw = if let Some(mask) = &field.mask {
		if let Some(display) = raw.as_str() {
			mask.strip(display)
		} else {
			raw
		}
	} else {
		raw
	};

	match field.kind {
		FieldKind::Text | FieldKind::Email | FieldKind::Date => {
			let trimmed = raw.as_str().map(|s| s.trim().to_string());
			match trimmed {
				Some(s) => serde_json::Value::String(s),
				None => raw,
			}
		}
		_ => raw,
	}
}

/// A value is empty when it is `null`, a blank (or whitespace-only) string,
/// or an empty list.
fn is_empty_value(value: &serde_json::Value) -> bool {
	match value {
		serde_json::Value::Null => true,
		serde_json::Value::String(s) => s.trim().is_empty(),
		serde_json::Value::Array(items) => items.is_empty(),
		_ => false,
	}
}

/// Presence for the `AnyOf` rule: a trimmed non-empty string, a non-empty
/// list, `true`, or any number. A field missing from the record counts as
/// its zero value, i.e. absent.
fn is_present(value: &serde_json::Value) -> bool {
	match value {
		serde_json::Value::Bool(b) => *b,
		other => !is_empty_value(other),
	}
}

fn rule_failure(rule: &CrossFieldRule, record: &Record) -> Option<String> {
	match rule {
		CrossFieldRule::AnyOf {
			fields, message, ..
		} => {
			let any = fields
				.iter()
				.any(|name| is_present(record.get(name).unwrap_or(&serde_json::Value::Null)));
			if any { None } else { Some(message.clone()) }
		}
		CrossFieldRule::FieldsEqual {
			fields, message, ..
		} => {
			let mut values = fields
				.iter()
				.map(|name| record.get(name).cloned().unwrap_or(serde_json::Value::Null));
			let first = values.next()?;
			if values.all(|v| v == first) {
				None
			} else {
				Some(message.clone())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::MaskKind;
	use rstest::rstest;
	use serde_json::json;

	fn record(entries: &[(&str, serde_json::Value)]) -> Record {
		entries
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[rstest]
	fn test_short_circuit_reports_first_failing_constraint() {
		// Arrange: "ab" fails both min_length(3) and pattern(digits)
		let schema = FormSchema::new("test").field(
			FieldSchema::new("code", FieldKind::Text)
				.min_length(3, "Code is too short")
				.pattern(r"^\d+$", "Code must be digits"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act
		let validation = compiled
			.validate(&record(&[("code", json!("ab"))]))
			.unwrap();

		// Assert: the first declared constraint's message wins
		let errors = validation.errors().unwrap();
		assert_eq!(errors.get("code").map(String::as_str), Some("Code is too short"));
	}

	#[rstest]
	fn test_validation_is_idempotent() {
		// Arrange
		let schema = FormSchema::new("test").field(
			FieldSchema::new("name", FieldKind::Text).required("Enter your name"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();
		let data = record(&[("name", json!(""))]);

		// Act
		let first = compiled.validate(&data).unwrap();
		let second = compiled.validate(&data).unwrap();

		// Assert
		assert_eq!(first, second);
	}

	#[rstest]
	fn test_missing_field_evaluates_as_zero_value() {
		// Arrange: record omits the required field entirely
		let schema = FormSchema::new("test").field(
			FieldSchema::new("name", FieldKind::Text).required("Enter your name"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act
		let validation = compiled.validate(&Record::new()).unwrap();

		// Assert
		let errors = validation.errors().unwrap();
		assert_eq!(errors.get("name").map(String::as_str), Some("Enter your name"));
	}

	#[rstest]
	fn test_field_with_no_constraints_is_always_valid() {
		// Arrange
		let schema = FormSchema::new("test").field(FieldSchema::new("bio", FieldKind::Text));
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act & Assert
		assert!(compiled.validate(&Record::new()).unwrap().is_valid());
		assert!(compiled
			.validate(&record(&[("bio", json!("anything"))]))
			.unwrap()
			.is_valid());
	}

	#[rstest]
	fn test_optional_field_skips_constraints_when_empty() {
		// Arrange: phone is optional but has a length floor when present
		let schema = FormSchema::new("test").field(
			FieldSchema::new("phone", FieldKind::Text).min_length(10, "Enter a full phone number"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act & Assert
		assert!(compiled
			.validate(&record(&[("phone", json!(""))]))
			.unwrap()
			.is_valid());
		assert!(!compiled
			.validate(&record(&[("phone", json!("119"))]))
			.unwrap()
			.is_valid());
	}

	#[rstest]
	fn test_masked_field_validates_and_normalizes_stripped_value() {
		// Arrange
		let schema = FormSchema::new("address").field(
			FieldSchema::new("postal_code", FieldKind::Text)
				.masked(MaskKind::PostalCode)
				.required("Enter your postal code")
				.exact_length(8, "Enter a full postal code"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act: a fully typed mask validates; the record carries raw digits
		let validation = compiled
			.validate(&record(&[("postal_code", json!("04538-133"))]))
			.unwrap();

		// Assert
		let normalized = validation.record().unwrap();
		assert_eq!(normalized.get("postal_code"), Some(&json!("04538133")));

		// Act: a partial mask strips short and fails the length constraint
		let partial = compiled
			.validate(&record(&[("postal_code", json!("04538-1"))]))
			.unwrap();

		// Assert
		let errors = partial.errors().unwrap();
		assert_eq!(
			errors.get("postal_code").map(String::as_str),
			Some("Enter a full postal code")
		);
	}

	#[rstest]
	fn test_cross_field_rule_attaches_to_valid_target_only() {
		// Arrange: the target field also has its own failing constraint
		let schema = FormSchema::new("post")
			.field(FieldSchema::new("text", FieldKind::Text).max_length(5, "Too long"))
			.field(FieldSchema::new("attachments", FieldKind::File))
			.rule(CrossFieldRule::AnyOf {
				fields: vec!["text".into(), "attachments".into()],
				target_field: "text".into(),
				message: "Write something or attach a file".into(),
			});
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act: per-field error on the target; the cross-field rule must not
		// overwrite it
		let validation = compiled
			.validate(&record(&[("text", json!("abcdefgh")), ("attachments", json!([]))]))
			.unwrap();

		// Assert
		let errors = validation.errors().unwrap();
		assert_eq!(errors.get("text").map(String::as_str), Some("Too long"));
	}

	#[rstest]
	fn test_any_of_rule_with_missing_fields_uses_zero_values() {
		// Arrange: rule references a field that is not in the schema at all
		let schema = FormSchema::new("post")
			.field(FieldSchema::new("text", FieldKind::Text))
			.rule(CrossFieldRule::AnyOf {
				fields: vec!["text".into(), "ghost".into()],
				target_field: "text".into(),
				message: "Write something".into(),
			});
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act
		let validation = compiled.validate(&Record::new()).unwrap();

		// Assert: ghost evaluates as null, text as "", so the rule fails
		let errors = validation.errors().unwrap();
		assert_eq!(errors.get("text").map(String::as_str), Some("Write something"));
	}

	#[rstest]
	fn test_fields_equal_rule() {
		// Arrange
		let schema = FormSchema::new("reset")
			.field(FieldSchema::new("password", FieldKind::Password).password_policy())
			.field(
				FieldSchema::new("password_confirmation", FieldKind::Password)
					.required("Confirm your password"),
			)
			.rule(CrossFieldRule::FieldsEqual {
				fields: vec!["password".into(), "password_confirmation".into()],
				target_field: "password_confirmation".into(),
				message: "Passwords do not match".into(),
			});
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act & Assert: mismatch attaches to the confirmation field
		let mismatch = compiled
			.validate(&record(&[
				("password", json!("Secret1!")),
				("password_confirmation", json!("Secret2!")),
			]))
			.unwrap();
		assert_eq!(
			mismatch
				.errors()
				.unwrap()
				.get("password_confirmation")
				.map(String::as_str),
			Some("Passwords do not match")
		);

		// Matching values pass
		let matching = compiled
			.validate(&record(&[
				("password", json!("Secret1!")),
				("password_confirmation", json!("Secret1!")),
			]))
			.unwrap();
		assert!(matching.is_valid());
	}

	#[rstest]
	fn test_currency_mask_feeds_numeric_constraints() {
		// Arrange: a marketplace price, masked as currency, floor of R$ 1,00
		let schema = FormSchema::new("listing").field(
			FieldSchema::new("price", FieldKind::Number)
				.masked(MaskKind::Currency)
				.required("Enter a price")
				.min_value(100.0, "Price must be at least R$ 1,00")
				.max_value(10_000_000.0, "Price is above the marketplace limit"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act: the display string strips to integer cents
		let validation = compiled
			.validate(&record(&[("price", json!("R$ 1.234,56"))]))
			.unwrap();

		// Assert
		let normalized = validation.record().unwrap();
		assert_eq!(normalized.get("price"), Some(&json!(123456)));

		let too_cheap = compiled
			.validate(&record(&[("price", json!("R$ 0,50"))]))
			.unwrap();
		assert_eq!(
			too_cheap.errors().unwrap().get("price").map(String::as_str),
			Some("Price must be at least R$ 1,00")
		);
	}

	#[rstest]
	fn test_explicit_null_counts_as_missing() {
		// Arrange: terms checkbox bound as null by a half-initialized view
		let schema = FormSchema::new("consent").field(
			FieldSchema::new("agreed", FieldKind::Boolean).accepted("You must accept the terms"),
		);
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act
		let validation = compiled
			.validate(&record(&[("agreed", serde_json::Value::Null)]))
			.unwrap();

		// Assert: null becomes the boolean zero value, which fails Accepted
		assert_eq!(
			validation.errors().unwrap().get("agreed").map(String::as_str),
			Some("You must accept the terms")
		);
	}

	#[rstest]
	fn test_refinement_error_propagates_as_internal() {
		// Arrange: a refinement that breaks its purity contract
		let schema =
			FormSchema::new("test").field(FieldSchema::new("name", FieldKind::Text));
		let mut compiled = CompiledForm::compile(schema).unwrap();
		compiled.add_field_refinement("name", |_| anyhow::bail!("refinement exploded"));

		// Act
		let result = compiled.validate(&record(&[("name", json!("Alice"))]));

		// Assert: an internal error is never reported as a field error
		assert!(matches!(
			result,
			Err(PipelineError::Internal { ref field, .. }) if field == "name"
		));
	}

	#[rstest]
	fn test_refinement_failure_is_a_field_error() {
		// Arrange
		let schema =
			FormSchema::new("test").field(FieldSchema::new("unit", FieldKind::Text));
		let mut compiled = CompiledForm::compile(schema).unwrap();
		compiled.add_field_refinement("unit", |value| {
			let known = value.as_str().is_some_and(|s| s.starts_with("apt-"));
			Ok(if known {
				ConstraintOutcome::Pass
			} else {
				ConstraintOutcome::Fail("Unknown unit".into())
			})
		});

		// Act
		let validation = compiled
			.validate(&record(&[("unit", json!("house-3"))]))
			.unwrap();

		// Assert
		assert_eq!(
			validation.errors().unwrap().get("unit").map(String::as_str),
			Some("Unknown unit")
		);
	}

	#[rstest]
	fn test_text_values_are_trimmed_in_normalized_record() {
		// Arrange
		let schema = FormSchema::new("test")
			.field(FieldSchema::new("name", FieldKind::Text).required("Enter your name"))
			.field(FieldSchema::new("password", FieldKind::Password).password_policy());
		let compiled = CompiledForm::compile(schema).unwrap();

		// Act
		let validation = compiled
			.validate(&record(&[
				("name", json!("  Alice  ")),
				("password", json!("Secret1! ")),
			]))
			.unwrap();

		// Assert: text trimmed, password preserved byte for byte
		let normalized = validation.record().unwrap();
		assert_eq!(normalized.get("name"), Some(&json!("Alice")));
		assert_eq!(normalized.get("password"), Some(&json!("Secret1! ")));
	}
}
