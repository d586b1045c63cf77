//! # Phonebook Core
//!
//! Record management for the phonebook service: the person record type,
//! identity policies, the validation guard, the record stores and the CRUD
//! service that ties them together. The HTTP surface lives in the server crate.

#![warn(missing_docs)]

/// Application wiring: configuration, logging, state and factory
pub mod core;

/// Type definitions for records, identifiers and errors
pub mod types;

/// System constants
pub mod constants;

/// Identity assignment policies
pub mod identity;

/// Input validation and the uniqueness guard
pub mod validation;

/// Record store backends
pub mod storage;

/// CRUD service over a record store
pub mod service;

// Re-export commonly used items
pub use types::{Person, PersonDraft, PersonId, RecordKey};
pub use types::error::{PhonebookError, Result};
pub use service::PersonService;
pub use storage::{PersonStore, StorageImpl};
