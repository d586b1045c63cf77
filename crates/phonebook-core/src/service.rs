//! Person CRUD service.
//!
//! Routes each operation through the validation guard and the identity
//! policy before it reaches the store. The HTTP handlers call only this type.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::identity::IdentityAssigner;
use crate::storage::{PersonStore, StorageImpl};
use crate::types::error::Result;
use crate::types::{Person, PersonId, PersonPayload};
use crate::validation::ValidationGuard;
use crate::{log_debug, log_info};

/// Snapshot served by the info endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInfo {
    /// Number of live records
    pub count: usize,
    /// Server time when the snapshot was taken
    pub generated_at: DateTime<Local>,
}

impl DirectoryInfo {
    /// HTML fragment with the record count and timestamp
    pub fn to_html(&self) -> String {
        format!(
            "<p>Phonebook has info for {} people.</p><p>{}</p>",
            self.count,
            self.generated_at.format("%a %b %d %Y %H:%M:%S GMT%z")
        )
    }
}

/// CRUD service over a record store
pub struct PersonService<S: StorageImpl> {
    store: Arc<S>,
    identity: Arc<dyn IdentityAssigner>,
    guard: ValidationGuard,
}

impl<S: StorageImpl> PersonService<S> {
    /// Create a service over `store` with the given policy and guard
    pub fn new(store: Arc<S>, identity: Arc<dyn IdentityAssigner>, guard: ValidationGuard) -> Self {
        Self { store, identity, guard }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The active identity policy
    pub fn identity(&self) -> &dyn IdentityAssigner {
        self.identity.as_ref()
    }

    /// Parse a raw identifier using the active policy
    pub fn parse_id(&self, raw: &str) -> Result<PersonId> {
        self.identity.parse(raw)
    }

    /// Every live record
    pub fn list(&self) -> Result<Vec<Person>> {
        self.store.list_all()
    }

    /// Record count and current server time
    pub fn info(&self) -> Result<DirectoryInfo> {
        Ok(DirectoryInfo {
            count: self.store.count()?,
            generated_at: Local::now(),
        })
    }

    /// One record by raw identifier
    pub fn get(&self, raw_id: &str) -> Result<Person> {
        let id = self.parse_id(raw_id)?;
        self.store.find_by_id(&id)
    }

    /// Validate, assign identity and store a new record
    pub fn create(&self, payload: PersonPayload) -> Result<Person> {
        let draft = self.guard.check_create(payload)?;
        let id = self.identity.assign();
        log_debug!("Creating person '{}' with assigned id {:?}", draft.name, id);

        let person = if self.guard.unique_names() {
            self.store.insert_if_name_vacant(id, draft)?
        } else {
            self.store.insert(id, draft)?
        };
        log_info!("Created person {}", person.id);
        Ok(person)
    }

    /// Replace name and number of an existing record
    pub fn update(&self, raw_id: &str, payload: PersonPayload) -> Result<Person> {
        let id = self.parse_id(raw_id)?;
        let draft = self.guard.check_update(payload)?;
        let person = self.store.replace_by_id(&id, draft)?;
        log_info!("Updated person {}", person.id);
        Ok(person)
    }

    /// Remove a record; absent records are not an error
    pub fn delete(&self, raw_id: &str) -> Result<()> {
        let id = self.parse_id(raw_id)?;
        self.store.delete_by_id(&id)?;
        log_info!("Deleted person {}", id);
        Ok(())
    }

    /// Load the sample contacts through the active policy
    pub fn seed_sample_data(&self) -> Result<usize> {
        let mut seeded = 0;
        for (name, number) in crate::constants::SAMPLE_CONTACTS {
            self.create(PersonPayload::new(name, number))?;
            seeded += 1;
        }
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{RandomIdentity, StoreAssignedIdentity};
    use crate::storage::{DocumentStore, MemoryStore};
    use crate::types::error::PhonebookError;

    fn memory_service(unique_names: bool) -> PersonService<MemoryStore> {
        PersonService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(RandomIdentity::new(1_000_000)),
            ValidationGuard::new(unique_names),
        )
    }

    fn document_service(unique_names: bool) -> PersonService<DocumentStore> {
        PersonService::new(
            Arc::new(DocumentStore::new()),
            Arc::new(StoreAssignedIdentity),
            ValidationGuard::new(unique_names),
        )
    }

    #[test]
    fn test_create_then_read_roundtrip() {
        let service = memory_service(true);
        let created = service
            .create(PersonPayload::new("Ada Lovelace", "39-44-5323523"))
            .unwrap();

        let fetched = service.get(&created.id.to_string()).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(service.list().unwrap(), vec![created]);
    }

    #[test]
    fn test_create_missing_field_persists_nothing() {
        let service = memory_service(true);
        let result = service.create(PersonPayload::new("", "123"));
        assert_eq!(result, Err(PhonebookError::MissingField));
        assert_eq!(service.store().count().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_name_toggle() {
        let strict = document_service(true);
        strict.create(PersonPayload::new("Dan Abramov", "1")).unwrap();
        assert!(matches!(
            strict.create(PersonPayload::new("Dan Abramov", "2")),
            Err(PhonebookError::DuplicateName { .. })
        ));
        assert_eq!(strict.list().unwrap().len(), 1);

        let lenient = document_service(false);
        lenient.create(PersonPayload::new("Dan Abramov", "1")).unwrap();
        lenient.create(PersonPayload::new("Dan Abramov", "2")).unwrap();
        assert_eq!(lenient.list().unwrap().len(), 2);
    }

    #[test]
    fn test_update_missing_record_creates_nothing() {
        let service = document_service(true);
        let raw = crate::types::RecordKey::random().to_string();

        let result = service.update(&raw, PersonPayload::new("Ghost", "0"));
        assert!(matches!(result, Err(PhonebookError::NotFound { .. })));
        assert_eq!(service.list().unwrap().len(), 0);
    }

    #[test]
    fn test_update_rejects_empty_fields() {
        let service = memory_service(true);
        let created = service.create(PersonPayload::new("Arto Hellas", "040-123456")).unwrap();

        let result = service.update(&created.id.to_string(), PersonPayload::new("Arto Hellas", ""));
        assert_eq!(result, Err(PhonebookError::MissingField));
        assert_eq!(service.get(&created.id.to_string()).unwrap().number, "040-123456");
    }

    #[test]
    fn test_delete_twice_then_read() {
        let service = memory_service(true);
        let created = service.create(PersonPayload::new("Mary Poppendieck", "39-23-6423122")).unwrap();
        let raw = created.id.to_string();

        service.delete(&raw).unwrap();
        service.delete(&raw).unwrap();
        assert!(matches!(service.get(&raw), Err(PhonebookError::NotFound { .. })));
    }

    #[test]
    fn test_malformed_ids_are_distinct_from_not_found() {
        let memory = memory_service(true);
        assert!(matches!(memory.get("abc"), Err(PhonebookError::MalformedIdentifier { .. })));
        assert!(matches!(memory.delete("abc"), Err(PhonebookError::MalformedIdentifier { .. })));

        let document = document_service(true);
        assert!(matches!(document.get("12"), Err(PhonebookError::MalformedIdentifier { .. })));
    }

    #[test]
    fn test_seed_and_info() {
        let service = memory_service(true);
        assert_eq!(service.seed_sample_data().unwrap(), 4);

        let info = service.info().unwrap();
        assert_eq!(info.count, 4);
        assert!(info.to_html().starts_with("<p>Phonebook has info for 4 people.</p><p>"));
    }
}
