//! # Varanda
//!
//! Validated form pipeline for a condominium-management portal.
//!
//! Varanda is the logic core behind the portal's resident-facing forms:
//! signup, login, password reset, profile and address editing, and post
//! composition. It turns declarative, serializable field schemas into an
//! executable validation pass, keeps per-form state with an always-accurate
//! error map, and drives submission through a small state machine with
//! re-entrancy and teardown guarantees.
//!
//! Rendering, routing, and the HTTP client are external collaborators; this
//! workspace owns validation semantics only.
//!
//! ## Crates
//!
//! - [`validators`] - reusable value validators (lengths, email, password
//!   policy, minimum age, CPF check digits)
//! - [`masks`] - display masks and their inverses (phone, CPF, postal code,
//!   currency)
//! - [`forms`] - schemas, the compiler, form state, the submission state
//!   machine, and the portal's concrete form definitions
//!
//! ## Quick Example
//!
//! ```
//! use varanda::forms::{schemas, CompiledForm, FormState};
//! use serde_json::json;
//!
//! let compiled = CompiledForm::compile(schemas::login()).unwrap();
//! let mut state = FormState::new(compiled);
//!
//! state.set_value("email", json!("resident@example.com")).unwrap();
//! state.set_value("password", json!("Secret1!")).unwrap();
//!
//! assert!(state.validate().unwrap().is_valid());
//! ```

pub use varanda_forms as forms;
pub use varanda_masks as masks;
pub use varanda_validators as validators;

/// Commonly used types, importable in one line.
pub mod prelude {
	pub use varanda_forms::{
		CompiledForm, Constraint, CrossFieldRule, Dialog, FieldKind, FieldSchema, FormPipeline,
		FormSchema, FormState, MaskKind, PipelineError, Record, ResidentProfile, SessionContext,
		SubmitOutcome, SubmitResponse, Transport, Validation,
	};
	pub use varanda_masks::Mask;
	pub use varanda_validators::{ValidationError, Validator};
}
