//! Submission state machine
//!
//! [`FormPipeline`] drives one form through
//! `Idle -> Validating -> {Idle(+errors) | Submitting -> {Idle(reset) | Idle(+banner)}}`.
//!
//! Guarantees, enforced here rather than by UI affordances:
//!
//! - the transport is awaited at most once per successful validation pass;
//! - a submit attempt while another is in flight is ignored, with zero
//!   additional transport calls;
//! - after the owning view detaches, a late transport completion mutates
//!   nothing.

use crate::compiler::{PipelineError, Validation};
use crate::form::FormState;
use crate::schema::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Backend reply to a submitted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
	pub status: bool,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<serde_json::Value>,
}

/// The outward call that carries a normalized record to the backend.
///
/// The pipeline treats this as opaque: no retries, no caching. A rejection
/// is reported through `Ok` with `status: false`; the `Err` channel is for
/// transport-level failures (network, serialization), and either way the
/// message reaches the user as a banner.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn submit(&self, record: &Record) -> anyhow::Result<SubmitResponse>;
}

/// Externally observable phase of the machine.
///
/// `Validating` is synchronous and collapses into the submit call itself;
/// it is listed for completeness but an observer polling between awaits
/// only ever sees `Idle` or `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
	Idle,
	Validating,
	Submitting,
}

/// What one `submit()` call amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// Validation failed; all field errors surfaced simultaneously.
	Invalid(HashMap<String, String>),
	/// The backend accepted the record; the form has been reset.
	Completed(SubmitResponse),
	/// The backend rejected the record or the transport failed; values are
	/// preserved and the message is available as the banner.
	Failed(String),
	/// Another submission was already in flight; nothing happened.
	Ignored,
	/// The owning view detached while the call was in flight; state was
	/// left untouched.
	Detached,
}

/// Clonable handle that marks the pipeline's owning view as gone.
#[derive(Debug, Clone)]
pub struct DetachHandle {
	alive: Arc<AtomicBool>,
}

impl DetachHandle {
	/// After this call, any in-flight submission completes as
	/// [`SubmitOutcome::Detached`] without touching form state.
	pub fn detach(&self) {
		self.alive.store(false, Ordering::Release);
	}
}

/// Drives validation and submission for one mounted form.
pub struct FormPipeline {
	state: Mutex<FormState>,
	transport: Arc<dyn Transport>,
	in_flight: AtomicBool,
	banner: Mutex<Option<String>>,
	alive: Arc<AtomicBool>,
}

impl FormPipeline {
	pub fn new(state: FormState, transport: Arc<dyn Transport>) -> Self {
		Self {
			state: Mutex::new(state),
			transport,
			in_flight: AtomicBool::new(false),
			banner: Mutex::new(None),
			alive: Arc::new(AtomicBool::new(true)),
		}
	}

	/// Handle for the owning view's teardown path.
	pub fn detach_handle(&self) -> DetachHandle {
		DetachHandle {
			alive: Arc::clone(&self.alive),
		}
	}

	pub fn phase(&self) -> SubmissionPhase {
		if self.in_flight.load(Ordering::Acquire) {
			SubmissionPhase::Submitting
		} else {
			SubmissionPhase::Idle
		}
	}

	/// Current top-level failure banner, if the last submission failed.
	pub fn banner(&self) -> Option<String> {
		self.lock_banner().clone()
	}

	/// Binds one field value through to the underlying [`FormState`].
	pub fn set_value(
		&self,
		field: impl Into<String>,
		value: serde_json::Value,
	) -> Result<(), PipelineError> {
		self.lock_state().set_value(field, value)
	}

	/// Read access to the underlying form state.
	pub fn with_state<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
		f(&self.lock_state())
	}

	/// One submit attempt: validate, and when clean, await the transport
	/// exactly once.
	pub async fn submit(&self) -> Result<SubmitOutcome, PipelineError> {
		// Re-entrancy gate: the machine, not a disabled button, guarantees
		// a single in-flight call.
		if self
			.in_flight
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			tracing::debug!(form = %self.form_name(), "submit ignored, already in flight");
			return Ok(SubmitOutcome::Ignored);
		}

		let outcome = self.run_submit().await;
		self.in_flight.store(false, Ordering::Release);
		outcome
	}

	async fn run_submit(&self) -> Result<SubmitOutcome, PipelineError> {
		let record = {
			let mut state = self.lock_state();
			match state.validate()? {
				Validation::Invalid(errors) => {
					tracing::debug!(
						form = %state.schema().name,
						error_count = errors.len(),
						"validation failed"
					);
					return Ok(SubmitOutcome::Invalid(errors));
				}
				Validation::Valid(record) => record,
			}
		};

		*self.lock_banner() = None;
		tracing::debug!(form = %self.form_name(), "validation passed, submitting");

		let response = self.transport.submit(&record).await;

		if !self.alive.load(Ordering::Acquire) {
			tracing::debug!(form = %self.form_name(), "view detached, dropping submission result");
			return Ok(SubmitOutcome::Detached);
		}

		match response {
			Ok(response) if response.status => {
				self.lock_state().reset();
				tracing::info!(form = %self.form_name(), "submission accepted");
				Ok(SubmitOutcome::Completed(response))
			}
			Ok(response) => {
				tracing::warn!(
					form = %self.form_name(),
					message = %response.message,
					"submission rejected"
				);
				*self.lock_banner() = Some(response.message.clone());
				Ok(SubmitOutcome::Failed(response.message))
			}
			Err(error) => {
				let message = error.to_string();
				tracing::warn!(form = %self.form_name(), error = %message, "transport failed");
				*self.lock_banner() = Some(message.clone());
				Ok(SubmitOutcome::Failed(message))
			}
		}
	}

	fn form_name(&self) -> String {
		self.lock_state().schema().name.clone()
	}

	fn lock_state(&self) -> MutexGuard<'_, FormState> {
		self.state.lock().expect("form state lock poisoned")
	}

	fn lock_banner(&self) -> MutexGuard<'_, Option<String>> {
		self.banner.lock().expect("banner lock poisoned")
	}
}
