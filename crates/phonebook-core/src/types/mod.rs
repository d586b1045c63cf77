//! Type definitions for the phonebook service

/// Record identifiers
pub mod ids;

/// Person record and request payloads
pub mod person;

/// Error taxonomy
pub mod error;

pub use ids::{PersonId, RecordKey};
pub use person::{Person, PersonDraft, PersonPayload};
