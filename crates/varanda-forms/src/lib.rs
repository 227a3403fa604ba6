//! Form pipeline for the Varanda condominium portal
//!
//! This crate provides the portal's validated form pipeline:
//! - declarative, serializable field schemas and cross-field rules
//! - a schema compiler producing a `validate(record)` pass with
//!   first-failing-constraint messages per field
//! - bound form state with an always-fresh error map
//! - a submission state machine with re-entrancy and teardown guarantees
//! - the portal's concrete schemas (signup, login, address, profile,
//!   password reset, post composition)
//! - session display state and typed dialog lifecycles shared by views

pub mod compiler;
pub mod dialog;
pub mod form;
pub mod schema;
pub mod schemas;
pub mod session;
pub mod submit;

pub use compiler::{CompiledForm, ConstraintOutcome, PipelineError, Validation};
pub use dialog::Dialog;
pub use form::{FieldDisplay, FormState};
pub use schema::{Constraint, CrossFieldRule, FieldKind, FieldSchema, FormSchema, MaskKind, Record};
pub use session::{ResidentProfile, SessionContext};
pub use submit::{
	DetachHandle, FormPipeline, SubmissionPhase, SubmitOutcome, SubmitResponse, Transport,
};
