//! Identity assignment policies.
//!
//! Exactly one policy is active per deployment, chosen at startup from
//! configuration. A policy decides two things: what identifier a new record
//! gets, and which path segments are well-formed identifiers at all.

use std::sync::Arc;

use rand::{rng, Rng};
use serde::{Deserialize, Serialize};

use crate::types::error::{PhonebookError, Result};
use crate::types::{PersonId, RecordKey};

/// Which identity policy a deployment runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Draw a random integer in process; collisions are possible and unresolved
    Random,
    /// Let the store mint a unique key on insert
    StoreAssigned,
}

impl std::str::FromStr for IdentityPolicy {
    type Err = PhonebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(IdentityPolicy::Random),
            "store_assigned" | "store" => Ok(IdentityPolicy::StoreAssigned),
            other => Err(PhonebookError::config(format!(
                "Invalid identity policy: {}. Valid options: random, store_assigned",
                other
            ))),
        }
    }
}

/// Assigns identifiers to new records and parses identifiers from requests
pub trait IdentityAssigner: Send + Sync {
    /// Identifier for a new record, or `None` when the store mints it
    fn assign(&self) -> Option<PersonId>;

    /// Parse a raw identifier, failing with `MalformedIdentifier` on a bad shape
    fn parse(&self, raw: &str) -> Result<PersonId>;

    /// The policy this assigner implements
    fn policy(&self) -> IdentityPolicy;
}

/// Random integer identifiers in `[0, upper_bound)`.
///
/// No collision check is made. For a small, non-persistent directory the
/// chance of two records sharing an id is accepted.
#[derive(Debug, Clone)]
pub struct RandomIdentity {
    upper_bound: u64,
}

impl RandomIdentity {
    /// Create a generator drawing from `[0, upper_bound)`
    pub fn new(upper_bound: u64) -> Self {
        Self {
            upper_bound: upper_bound.max(1),
        }
    }
}

impl IdentityAssigner for RandomIdentity {
    fn assign(&self) -> Option<PersonId> {
        Some(PersonId::Numeric(rng().random_range(0..self.upper_bound)))
    }

    fn parse(&self, raw: &str) -> Result<PersonId> {
        raw.parse::<u64>()
            .map(PersonId::Numeric)
            .map_err(|_| PhonebookError::malformed(raw))
    }

    fn policy(&self) -> IdentityPolicy {
        IdentityPolicy::Random
    }
}

/// Identifiers minted by the store as [`RecordKey`]s
#[derive(Debug, Clone, Default)]
pub struct StoreAssignedIdentity;

impl IdentityAssigner for StoreAssignedIdentity {
    fn assign(&self) -> Option<PersonId> {
        None
    }

    fn parse(&self, raw: &str) -> Result<PersonId> {
        raw.parse::<RecordKey>()
            .map(PersonId::Key)
            .map_err(|_| PhonebookError::malformed(raw))
    }

    fn policy(&self) -> IdentityPolicy {
        IdentityPolicy::StoreAssigned
    }
}

/// Build the assigner for a configured policy
pub fn create_identity_assigner(
    policy: IdentityPolicy,
    random_upper_bound: u64,
) -> Arc<dyn IdentityAssigner> {
    match policy {
        IdentityPolicy::Random => Arc::new(RandomIdentity::new(random_upper_bound)),
        IdentityPolicy::StoreAssigned => Arc::new(StoreAssignedIdentity),
    }
}
