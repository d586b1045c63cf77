//! Simple in-memory storage implementation
//!
//! Records live in an insertion-ordered `Vec` behind a `parking_lot::RwLock`.
//! Readers share the lock; every mutation takes it exclusively, so there is
//! at most one writer at a time.

use parking_lot::RwLock;

use crate::constants::MAX_KEY_MINT_ATTEMPTS;
use crate::storage::PersonStore;
use crate::types::error::{PhonebookError, Result};
use crate::types::{Person, PersonDraft, PersonId, RecordKey};
use crate::{log_debug, log_info};

/// Ordered in-memory person store
#[derive(Debug, Default)]
pub struct MemoryStore {
    persons: RwLock<Vec<Person>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            persons: RwLock::new(Vec::new()),
        }
    }

    fn mint_key(persons: &[Person]) -> Result<PersonId> {
        for _ in 0..MAX_KEY_MINT_ATTEMPTS {
            let candidate = PersonId::Key(RecordKey::random());
            if !persons.iter().any(|p| p.id == candidate) {
                return Ok(candidate);
            }
        }
        Err(PhonebookError::internal("could not mint an unused record key"))
    }

    fn push(persons: &mut Vec<Person>, id: Option<PersonId>, draft: PersonDraft) -> Result<Person> {
        let id = match id {
            Some(id) => id,
            None => Self::mint_key(persons.as_slice())?,
        };

        let person = Person::from_draft(id, draft);
        persons.push(person.clone());
        log_info!("MemoryStore::insert - id: {}, count now: {}", person.id, persons.len());
        Ok(person)
    }
}

impl PersonStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Person>> {
        Ok(self.persons.read().clone())
    }

    fn find_by_id(&self, id: &PersonId) -> Result<Person> {
        self.persons
            .read()
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| PhonebookError::not_found(id))
    }

    fn insert(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person> {
        let mut persons = self.persons.write();
        Self::push(&mut persons, id, draft)
    }

    fn insert_if_name_vacant(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person> {
        let mut persons = self.persons.write();
        if persons.iter().any(|p| p.name == draft.name) {
            log_debug!("MemoryStore::insert - name taken: {}", draft.name);
            return Err(PhonebookError::DuplicateName { name: draft.name });
        }
        Self::push(&mut persons, id, draft)
    }

    fn replace_by_id(&self, id: &PersonId, draft: PersonDraft) -> Result<Person> {
        let mut persons = self.persons.write();
        let person = persons
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| PhonebookError::not_found(id))?;

        person.apply(draft);
        log_debug!("MemoryStore::replace_by_id - id: {}", id);
        Ok(person.clone())
    }

    fn delete_by_id(&self, id: &PersonId) -> Result<()> {
        let mut persons = self.persons.write();
        let before = persons.len();
        persons.retain(|p| p.id != *id);
        log_debug!(
            "MemoryStore::delete_by_id - id: {}, removed: {}",
            id,
            before - persons.len()
        );
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.persons.read().len())
    }
}
