//! The person record and its input forms.

use serde::{Deserialize, Serialize};

use super::ids::PersonId;

/// A single directory entry as stored and served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Identifier assigned at creation, never changed
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Phone number, free-form text
    pub number: String,
}

impl Person {
    /// Build a stored record from an identifier and a validated draft
    pub fn from_draft(id: PersonId, draft: PersonDraft) -> Self {
        Self {
            id,
            name: draft.name,
            number: draft.number,
        }
    }

    /// Replace name and number, keeping the identifier
    pub fn apply(&mut self, draft: PersonDraft) {
        self.name = draft.name;
        self.number = draft.number;
    }
}

/// Name and number that passed the validation guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    /// Non-empty name
    pub name: String,
    /// Non-empty number
    pub number: String,
}

/// Body of a create or update request, before validation.
///
/// Both fields are optional so that a missing field reaches the guard and
/// yields the missing-field error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPayload {
    /// Requested name
    #[serde(default)]
    pub name: Option<String>,
    /// Requested number
    #[serde(default)]
    pub number: Option<String>,
}

impl PersonPayload {
    /// Convenience constructor, mostly for tests and seeding
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}
