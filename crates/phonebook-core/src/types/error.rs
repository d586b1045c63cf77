//! Error types and handling for the phonebook service
//!
//! Every failure a request can hit is one variant of [`PhonebookError`]. The
//! HTTP layer maps variants to status codes by kind, never by message text.

use thiserror::Error;

use crate::constants::{MISSING_FIELD_MESSAGE, UNKNOWN_ENDPOINT_MESSAGE};

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Short alias used inside the crate
pub type Error = PhonebookError;

/// Main error type for the phonebook service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhonebookError {
    /// A draft arrived without a name or without a number
    #[error("{}", MISSING_FIELD_MESSAGE)]
    MissingField,

    /// The uniqueness guard rejected a name that is already taken
    #[error("{name} is already in the phonebook (name must be unique)")]
    DuplicateName {
        /// The name that collided
        name: String,
    },

    /// No live record carries the requested identifier
    #[error("Person {id} not found")]
    NotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// The identifier does not have the shape the active identity policy uses
    #[error("Malformatted id: {raw}")]
    MalformedIdentifier {
        /// The raw identifier as received
        raw: String,
    },

    /// The persistence schema rejected a record
    #[error("Person validation failed: {0}")]
    Validation(String),

    /// No route matched the request
    #[error("{}", UNKNOWN_ENDPOINT_MESSAGE)]
    UnknownRoute,

    /// Configuration errors, raised only while booting
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PhonebookError {
    /// Create a not-found error for an identifier
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Create a malformed-identifier error
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedIdentifier { raw: raw.into() }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a schema validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller sent something the service cannot accept
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Internal(_))
    }
}
