//! Session display state
//!
//! Views need the signed-in resident's identity for headers, avatars, and
//! author pre-fill. Rather than a module-level global, a [`SessionContext`]
//! is constructed at application start and handed to each view, so the
//! read/write contract is explicit and tests can inject their own.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Display identity of the signed-in resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentProfile {
	pub id: i64,
	pub name: String,
	pub email: String,
	/// Condominium unit, e.g. "B-204". Absent for staff accounts.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unit: Option<String>,
}

/// Injected session-state service.
///
/// Reads return clones so no lock is held across view code; writes replace
/// the profile whole.
#[derive(Debug, Default)]
pub struct SessionContext {
	current: RwLock<Option<ResidentProfile>>,
}

impl SessionContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores the profile after a successful sign-in.
	pub fn sign_in(&self, profile: ResidentProfile) {
		*self.write() = Some(profile);
	}

	/// Clears the profile on sign-out or session expiry.
	pub fn sign_out(&self) {
		*self.write() = None;
	}

	/// Replaces fields of the current profile, if one is present (profile
	/// edit saved).
	pub fn update(&self, f: impl FnOnce(&mut ResidentProfile)) {
		if let Some(profile) = self.write().as_mut() {
			f(profile);
		}
	}

	pub fn current(&self) -> Option<ResidentProfile> {
		self.read().clone()
	}

	pub fn is_signed_in(&self) -> bool {
		self.read().is_some()
	}

	fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<ResidentProfile>> {
		self.current.read().expect("session lock poisoned")
	}

	fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<ResidentProfile>> {
		self.current.write().expect("session lock poisoned")
	}
}
