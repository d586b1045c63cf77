//! Identifier types for person records.
//!
//! A record is identified either by a plain integer (random identity policy)
//! or by a [`RecordKey`] minted by the store (store-assigned policy). Both
//! travel over the wire as their natural JSON shape: a number or a string.

use std::fmt;
use std::str::FromStr;

use rand::{rng, Rng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{BASE62_CHARS, RECORD_KEY_LENGTH};

/// Fixed-size 16-character base62 key minted by a store.
///
/// Memory Layout:
/// - [u8; 16] - ASCII bytes drawn from [`BASE62_CHARS`]
///
/// Every constructor checks the alphabet, so the bytes are always valid UTF-8.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey([u8; RECORD_KEY_LENGTH]);

impl RecordKey {
    /// Generate a random 16-character base62 key
    pub fn random() -> Self {
        let mut rng = rng();
        let mut bytes = [0u8; RECORD_KEY_LENGTH];

        for byte in bytes.iter_mut() {
            *byte = BASE62_CHARS[rng.random_range(0..BASE62_CHARS.len())];
        }

        RecordKey(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; RECORD_KEY_LENGTH] {
        &self.0
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        // Safety: construction only admits BASE62_CHARS, which are ASCII
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKey {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != RECORD_KEY_LENGTH {
            return Err("record key must be exactly 16 characters");
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err("record key must be base62");
        }

        let mut bytes = [0u8; RECORD_KEY_LENGTH];
        bytes.copy_from_slice(s.as_bytes());
        Ok(RecordKey(bytes))
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of a person record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonId {
    /// Integer drawn by the random identity policy
    Numeric(u64),
    /// Key minted by the store
    Key(RecordKey),
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonId::Numeric(n) => write!(f, "{}", n),
            PersonId::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<RecordKey> for PersonId {
    fn from(key: RecordKey) -> Self {
        PersonId::Key(key)
    }
}

impl From<u64> for PersonId {
    fn from(n: u64) -> Self {
        PersonId::Numeric(n)
    }
}
