//! Record schema for the document store.
//!
//! The document store checks every record it writes against this schema and
//! reports violations as `PhonebookError::Validation`.

use serde::{Deserialize, Serialize};

use crate::types::error::{PhonebookError, Result};
use crate::types::PersonDraft;

/// Field constraints applied on insert and on replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSchema {
    /// Minimum name length in characters
    #[serde(default = "default_min_length")]
    pub name_min_length: usize,

    /// Minimum number length in characters
    #[serde(default = "default_min_length")]
    pub number_min_length: usize,
}

fn default_min_length() -> usize { 1 }

impl Default for PersonSchema {
    fn default() -> Self {
        Self {
            name_min_length: default_min_length(),
            number_min_length: default_min_length(),
        }
    }
}

impl PersonSchema {
    /// Check a draft against the schema
    pub fn validate(&self, draft: &PersonDraft) -> Result<()> {
        let mut violations = Vec::new();

        if draft.name.chars().count() < self.name_min_length {
            violations.push(format!(
                "name: `{}` is shorter than the minimum allowed length ({})",
                draft.name, self.name_min_length
            ));
        }
        if draft.number.chars().count() < self.number_min_length {
            violations.push(format!(
                "number: `{}` is shorter than the minimum allowed length ({})",
                draft.number, self.number_min_length
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PhonebookError::validation(violations.join(", ")))
        }
    }
}
