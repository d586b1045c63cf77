//! Input validation and the uniqueness guard.
//!
//! The missing-field rule always runs, on create and on update. The
//! duplicate-name rule runs on create only and only when enabled; the store
//! enforces it inside its write path so concurrent creates cannot both pass.

use crate::types::error::{PhonebookError, Result};
use crate::types::{PersonDraft, PersonPayload};

/// Validation rules active for a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationGuard {
    unique_names: bool,
}

impl ValidationGuard {
    /// Create a guard; `unique_names` toggles the duplicate-name rule
    pub fn new(unique_names: bool) -> Self {
        Self { unique_names }
    }

    /// Whether duplicate names are rejected on create
    pub fn unique_names(&self) -> bool {
        self.unique_names
    }

    /// Check a creation payload; the name rule is left to the store
    pub fn check_create(&self, payload: PersonPayload) -> Result<PersonDraft> {
        require_fields(payload)
    }

    /// Check an update payload; only the missing-field rule applies
    pub fn check_update(&self, payload: PersonPayload) -> Result<PersonDraft> {
        require_fields(payload)
    }
}

impl Default for ValidationGuard {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Reject payloads with an absent or empty name or number
pub fn require_fields(payload: PersonPayload) -> Result<PersonDraft> {
    match (payload.name, payload.number) {
        (Some(name), Some(number)) if !name.is_empty() && !number.is_empty() => {
            Ok(PersonDraft { name, number })
        }
        _ => Err(PhonebookError::MissingField),
    }
}
