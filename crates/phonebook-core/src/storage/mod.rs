//! Storage layer for the phonebook
//!
//! This module provides the record store abstraction so that different
//! backends can sit behind the same CRUD service.

use crate::types::error::Result;
use crate::types::{Person, PersonDraft, PersonId};

/// Trait for person record storage implementations.
///
/// Records are returned by value; callers that need fresh data fetch again.
pub trait PersonStore: Send + Sync {
    /// Every live record, in a stable order
    fn list_all(&self) -> Result<Vec<Person>>;

    /// The record with this identifier, or `NotFound`
    fn find_by_id(&self, id: &PersonId) -> Result<Person>;

    /// Store a new record.
    ///
    /// With `Some(id)` the record is stored under that identifier as given.
    /// With `None` the store mints a unique identifier itself.
    fn insert(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person>;

    /// Like [`insert`](Self::insert), but fails with `DuplicateName` when a
    /// live record already has exactly this name. The check and the write
    /// happen atomically with respect to other inserts.
    fn insert_if_name_vacant(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person>;

    /// Replace name and number of an existing record, or `NotFound`
    fn replace_by_id(&self, id: &PersonId, draft: PersonDraft) -> Result<Person>;

    /// Remove a record; removing an absent record is not an error
    fn delete_by_id(&self, id: &PersonId) -> Result<()>;

    /// Number of live records
    fn count(&self) -> Result<usize>;
}

/// In-memory ordered list (single writer, concurrent readers)
pub mod memory;

/// Document collection with store-minted keys and a schema
pub mod document;

/// Schema enforced by the document store
pub mod schema;

pub use memory::MemoryStore;
pub use document::DocumentStore;
pub use schema::PersonSchema;

/// Helper trait that combines all requirements for storage implementations
/// This cleans up generic bounds throughout the codebase
pub trait StorageImpl: PersonStore + Send + Sync + 'static {}

/// Blanket implementation for any type that meets the requirements
impl<T> StorageImpl for T where T: PersonStore + Send + Sync + 'static {}

/// Available storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Ordered in-memory list behind a read/write lock
    Memory,
    /// Concurrent document collection with schema validation
    Document,
}

impl std::str::FromStr for StorageType {
    type Err = crate::types::error::PhonebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(StorageType::Memory),
            "document" => Ok(StorageType::Document),
            other => Err(crate::PhonebookError::config(format!(
                "Invalid storage type: {}. Valid options: memory, document",
                other
            ))),
        }
    }
}
