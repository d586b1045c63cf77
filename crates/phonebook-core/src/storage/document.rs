//! Document collection storage using DashMap
//!
//! Models a delegated persistence layer: the collection mints its own keys,
//! validates every written record against a [`PersonSchema`] and relies on
//! DashMap's sharded locking for concurrency. Callers add no locking.
//!
//! A second map counts live records per name. Unique-name inserts hold that
//! name's entry while the document is written; no other path holds both maps
//! at once.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::constants::MAX_KEY_MINT_ATTEMPTS;
use crate::storage::{PersonSchema, PersonStore};
use crate::types::error::{PhonebookError, Result};
use crate::types::{Person, PersonDraft, PersonId, RecordKey};
use crate::{log_debug, log_error, log_info};

/// A stored person with its insertion sequence number
#[derive(Debug, Clone)]
struct PersonDocument {
    seq: u64,
    person: Person,
}

/// Concurrent document store for person records
pub struct DocumentStore {
    /// Map of identifier to stored document
    documents: DashMap<PersonId, PersonDocument>,

    /// Live record count per name
    names: DashMap<String, usize>,

    /// Insertion counter, keeps listings in creation order
    next_seq: AtomicU64,

    /// Constraints checked on every write
    schema: PersonSchema,
}

impl DocumentStore {
    /// Create an empty store with the default schema
    pub fn new() -> Self {
        Self::with_schema(PersonSchema::default())
    }

    /// Create an empty store enforcing `schema`
    pub fn with_schema(schema: PersonSchema) -> Self {
        Self {
            documents: DashMap::new(),
            names: DashMap::new(),
            next_seq: AtomicU64::new(0),
            schema,
        }
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Insert under `id` only if the slot is free
    fn insert_vacant(&self, id: PersonId, draft: PersonDraft) -> std::result::Result<Person, PersonDraft> {
        match self.documents.entry(id) {
            Entry::Vacant(slot) => {
                let person = Person::from_draft(id, draft);
                slot.insert(PersonDocument {
                    seq: self.next_seq(),
                    person: person.clone(),
                });
                Ok(person)
            }
            Entry::Occupied(_) => Err(draft),
        }
    }

    /// Write a validated draft under the given or a freshly minted key
    fn store_document(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person> {
        let person = match id {
            Some(id) => self.insert_vacant(id, draft).map_err(|_| {
                log_error!("DocumentStore::insert - duplicate key: {}", id);
                PhonebookError::internal(format!("duplicate key: {}", id))
            })?,
            None => {
                let mut draft = draft;
                let mut minted = None;
                for _ in 0..MAX_KEY_MINT_ATTEMPTS {
                    match self.insert_vacant(PersonId::Key(RecordKey::random()), draft) {
                        Ok(person) => {
                            minted = Some(person);
                            break;
                        }
                        Err(returned) => draft = returned,
                    }
                }
                minted.ok_or_else(|| {
                    PhonebookError::internal("could not mint an unused record key")
                })?
            }
        };

        log_info!(
            "DocumentStore::insert - id: {}, count now: {}",
            person.id,
            self.documents.len()
        );
        Ok(person)
    }

    fn release_name(&self, name: &str) {
        if let Entry::Occupied(mut count) = self.names.entry(name.to_string()) {
            if *count.get() <= 1 {
                count.remove();
            } else {
                *count.get_mut() -= 1;
            }
        }
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonStore for DocumentStore {
    fn list_all(&self) -> Result<Vec<Person>> {
        let mut docs: Vec<PersonDocument> =
            self.documents.iter().map(|entry| entry.value().clone()).collect();
        docs.sort_by_key(|doc| doc.seq);
        Ok(docs.into_iter().map(|doc| doc.person).collect())
    }

    fn find_by_id(&self, id: &PersonId) -> Result<Person> {
        self.documents
            .get(id)
            .map(|doc| doc.person.clone())
            .ok_or_else(|| PhonebookError::not_found(id))
    }

    fn insert(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person> {
        self.schema.validate(&draft)?;
        let person = self.store_document(id, draft)?;
        *self.names.entry(person.name.clone()).or_insert(0) += 1;
        Ok(person)
    }

    fn insert_if_name_vacant(&self, id: Option<PersonId>, draft: PersonDraft) -> Result<Person> {
        self.schema.validate(&draft)?;

        let mut claim = self.names.entry(draft.name.clone()).or_insert(0);
        if *claim > 0 {
            log_debug!("DocumentStore::insert - name taken: {}", draft.name);
            return Err(PhonebookError::DuplicateName { name: draft.name });
        }

        let person = self.store_document(id, draft)?;
        *claim += 1;
        Ok(person)
    }

    fn replace_by_id(&self, id: &PersonId, draft: PersonDraft) -> Result<Person> {
        self.schema.validate(&draft)?;

        let (previous_name, person) = {
            let mut doc = self
                .documents
                .get_mut(id)
                .ok_or_else(|| PhonebookError::not_found(id))?;
            let previous_name = doc.person.name.clone();
            doc.person.apply(draft);
            (previous_name, doc.person.clone())
        };

        if previous_name != person.name {
            self.release_name(&previous_name);
            *self.names.entry(person.name.clone()).or_insert(0) += 1;
        }
        log_debug!("DocumentStore::replace_by_id - id: {}", id);
        Ok(person)
    }

    fn delete_by_id(&self, id: &PersonId) -> Result<()> {
        let removed = self.documents.remove(id);
        if let Some((_, doc)) = &removed {
            self.release_name(&doc.person.name);
        }
        log_debug!("DocumentStore::delete_by_id - id: {}, removed: {}", id, removed.is_some());
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.documents.len())
    }
}
