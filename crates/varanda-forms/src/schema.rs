//! Declarative form schemas
//!
//! A [`FormSchema`] is plain data: fields with ordered constraint lists plus
//! cross-field rules, all serializable. Behavior lives in the compiler,
//! which interprets this metadata; keeping the two apart makes schemas
//! testable and transmittable as JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use varanda_masks::{CpfMask, CurrencyMask, Mask, PhoneMask, PostalCodeMask};
use varanda_validators::PasswordRequirement;

/// Raw form data: field name to JSON value, as bound from the view layer.
pub type Record = HashMap<String, serde_json::Value>;

/// Primitive type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	Email,
	Password,
	Number,
	Date,
	Boolean,
	File,
}

impl FieldKind {
	/// The zero value substituted when a field is absent from the record.
	///
	/// # Examples
	///
	/// ```
	/// use varanda_forms::FieldKind;
	///
	/// assert_eq!(FieldKind::Text.zero_value(), serde_json::json!(""));
	/// assert_eq!(FieldKind::Date.zero_value(), serde_json::Value::Null);
	/// assert_eq!(FieldKind::Boolean.zero_value(), serde_json::json!(false));
	/// assert_eq!(FieldKind::File.zero_value(), serde_json::json!([]));
	/// ```
	pub fn zero_value(&self) -> serde_json::Value {
		match self {
			FieldKind::Text | FieldKind::Email | FieldKind::Password => {
				serde_json::Value::String(String::new())
			}
			FieldKind::Number | FieldKind::Date => serde_json::Value::Null,
			FieldKind::Boolean => serde_json::Value::Bool(false),
			FieldKind::File => serde_json::Value::Array(vec![]),
		}
	}
}

/// Display mask attached to a field.
///
/// Validation runs on the stripped value; the masked form exists only for
/// rendering and is never part of the outgoing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
	Phone,
	Cpf,
	PostalCode,
	Currency,
}

impl MaskKind {
	/// Strips a display string to the raw value stored in the record.
	///
	/// Digit masks strip to a digit string; the currency mask strips to an
	/// integer amount of cents (or `Null` when no digits are present).
	pub fn strip(&self, display: &str) -> serde_json::Value {
		match self {
			MaskKind::Phone => serde_json::Value::String(PhoneMask.strip(display)),
			MaskKind::Cpf => serde_json::Value::String(CpfMask.strip(display)),
			MaskKind::PostalCode => serde_json::Value::String(PostalCodeMask.strip(display)),
			MaskKind::Currency => match CurrencyMask.strip(display) {
				Some(cents) => serde_json::Value::Number(cents.into()),
				None => serde_json::Value::Null,
			},
		}
	}

	/// Formats a raw value for display.
	pub fn format(&self, raw: &serde_json::Value) -> String {
		match self {
			MaskKind::Phone => PhoneMask.apply(raw.as_str().unwrap_or("")),
			MaskKind::Cpf => CpfMask.apply(raw.as_str().unwrap_or("")),
			MaskKind::PostalCode => PostalCodeMask.apply(raw.as_str().unwrap_or("")),
			MaskKind::Currency => CurrencyMask.apply(raw.as_i64().unwrap_or(0)),
		}
	}
}

/// A single pass/fail rule applied to one field, with its display message.
///
/// Constraints are evaluated in declaration order and the first failing
/// constraint's message becomes the field's error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
	Required { message: String },
	MinLength { min: usize, message: String },
	MaxLength { max: usize, message: String },
	ExactLength { length: usize, message: String },
	Pattern { pattern: String, message: String },
	MinValue { min: f64, message: String },
	MaxValue { max: f64, message: String },
	Email { message: String },
	ValidDate { message: String },
	MinimumAge { years: u32, message: String },
	Accepted { message: String },
	Cpf { message: String },
	Password { requirement: PasswordRequirement },
}

impl Constraint {
	/// The message reported when this constraint fails.
	pub fn message(&self) -> &str {
		match self {
			Constraint::Required { message }
			| Constraint::MinLength { message, .. }
			| Constraint::MaxLength { message, .. }
			| Constraint::ExactLength { message, .. }
			| Constraint::Pattern { message, .. }
			| Constraint::MinValue { message, .. }
			| Constraint::MaxValue { message, .. }
			| Constraint::Email { message }
			| Constraint::ValidDate { message }
			| Constraint::MinimumAge { message, .. }
			| Constraint::Accepted { message }
			| Constraint::Cpf { message } => message,
			Constraint::Password { requirement } => requirement.message(),
		}
	}
}

/// A predicate over the whole record, attributed to one field for display.
///
/// Cross-field rules run after every per-field constraint and never
/// overwrite a per-field error on their target field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CrossFieldRule {
	/// At least one of `fields` must be present (trimmed non-empty string,
	/// non-empty list, or `true`).
	AnyOf {
		fields: Vec<String>,
		target_field: String,
		message: String,
	},
	/// Every listed field must hold the same value.
	FieldsEqual {
		fields: Vec<String>,
		target_field: String,
		message: String,
	},
}

impl CrossFieldRule {
	/// The field the rule's error is attached to.
	pub fn target_field(&self) -> &str {
		match self {
			CrossFieldRule::AnyOf { target_field, .. }
			| CrossFieldRule::FieldsEqual { target_field, .. } => target_field,
		}
	}
}

/// Schema for one form field: identity, kind, optional mask, and ordered
/// constraints. Built with chained methods, one per constraint kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
	pub name: String,
	pub kind: FieldKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mask: Option<MaskKind>,
	#[serde(default)]
	pub constraints: Vec<Constraint>,
}

impl FieldSchema {
	/// Creates a field with no constraints. A field with no constraints is
	/// always valid.
	///
	/// # Examples
	///
	/// ```
	/// use varanda_forms::{FieldKind, FieldSchema};
	///
	/// let field = FieldSchema::new("bio", FieldKind::Text);
	/// assert_eq!(field.name, "bio");
	/// assert!(field.constraints.is_empty());
	/// ```
	pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			name: name.into(),
			kind,
			label: None,
			mask: None,
			constraints: vec![],
		}
	}

	/// Sets the human-readable label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Attaches a display mask; validation will run on the stripped value.
	pub fn masked(mut self, mask: MaskKind) -> Self {
		self.mask = Some(mask);
		self
	}

	/// Appends an arbitrary constraint.
	pub fn constraint(mut self, constraint: Constraint) -> Self {
		self.constraints.push(constraint);
		self
	}

	/// Requires a non-empty value.
	///
	/// # Examples
	///
	/// ```
	/// use varanda_forms::{FieldKind, FieldSchema};
	///
	/// let field = FieldSchema::new("name", FieldKind::Text).required("Enter your name");
	/// assert_eq!(field.constraints.len(), 1);
	/// ```
	pub fn required(self, message: impl Into<String>) -> Self {
		self.constraint(Constraint::Required {
			message: message.into(),
		})
	}

	/// Requires at least `min` characters.
	pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
		self.constraint(Constraint::MinLength {
			min,
			message: message.into(),
		})
	}

	/// Requires at most `max` characters.
	pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
		self.constraint(Constraint::MaxLength {
			max,
			message: message.into(),
		})
	}

	/// Requires exactly `length` characters (typically on unmasked values).
	pub fn exact_length(self, length: usize, message: impl Into<String>) -> Self {
		self.constraint(Constraint::ExactLength {
			length,
			message: message.into(),
		})
	}

	/// Requires the value to match `pattern`. The pattern is compiled when
	/// the schema is compiled; a malformed pattern fails compilation, not
	/// validation.
	pub fn pattern(self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
		self.constraint(Constraint::Pattern {
			pattern: pattern.into(),
			message: message.into(),
		})
	}

	/// Requires a numeric value of at least `min`.
	pub fn min_value(self, min: f64, message: impl Into<String>) -> Self {
		self.constraint(Constraint::MinValue {
			min,
			message: message.into(),
		})
	}

	/// Requires a numeric value of at most `max`.
	pub fn max_value(self, max: f64, message: impl Into<String>) -> Self {
		self.constraint(Constraint::MaxValue {
			max,
			message: message.into(),
		})
	}

	/// Requires a well-formed email address.
	pub fn email(self, message: impl Into<String>) -> Self {
		self.constraint(Constraint::Email {
			message: message.into(),
		})
	}

	/// Requires a parseable ISO date. Place before [`Self::minimum_age`] so
	/// unparseable input gets the invalid-date message rather than the age
	/// message.
	pub fn valid_date(self, message: impl Into<String>) -> Self {
		self.constraint(Constraint::ValidDate {
			message: message.into(),
		})
	}

	/// Requires the date to be at least `years` whole years in the past,
	/// measured at validation time.
	pub fn minimum_age(self, years: u32, message: impl Into<String>) -> Self {
		self.constraint(Constraint::MinimumAge {
			years,
			message: message.into(),
		})
	}

	/// Requires a boolean `true` (consent checkboxes).
	pub fn accepted(self, message: impl Into<String>) -> Self {
		self.constraint(Constraint::Accepted {
			message: message.into(),
		})
	}

	/// Requires valid CPF check digits on the unmasked value.
	pub fn cpf(self, message: impl Into<String>) -> Self {
		self.constraint(Constraint::Cpf {
			message: message.into(),
		})
	}

	/// Appends the full resident password policy, in reporting order:
	/// length, uppercase, digit, symbol.
	///
	/// # Examples
	///
	/// ```
	/// use varanda_forms::{FieldKind, FieldSchema};
	///
	/// let field = FieldSchema::new("password", FieldKind::Password).password_policy();
	/// assert_eq!(field.constraints.len(), 4);
	/// ```
	pub fn password_policy(mut self) -> Self {
		for requirement in PasswordRequirement::ALL {
			self.constraints.push(Constraint::Password { requirement });
		}
		self
	}
}

/// A complete form: named, with ordered fields and cross-field rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchema {
	pub name: String,
	pub fields: Vec<FieldSchema>,
	#[serde(default)]
	pub rules: Vec<CrossFieldRule>,
}

impl FormSchema {
	/// Creates an empty schema.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: vec![],
			rules: vec![],
		}
	}

	/// Appends a field.
	pub fn field(mut self, field: FieldSchema) -> Self {
		self.fields.push(field);
		self
	}

	/// Appends a cross-field rule.
	pub fn rule(mut self, rule: CrossFieldRule) -> Self {
		self.rules.push(rule);
		self
	}

	/// Looks up a field by name.
	pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// A record holding every field's zero value.
	pub fn zero_record(&self) -> Record {
		self.fields
			.iter()
			.map(|f| (f.name.clone(), f.kind.zero_value()))
			.collect()
	}
}
