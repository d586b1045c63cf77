//! # Phonebook Server
//!
//! HTTP surface for the phonebook service: routing, handlers and the mapping
//! from core errors to JSON responses.

#![warn(missing_docs)]

/// HTTP API handlers and routing
pub mod api;

// Re-export core functionality
pub use phonebook_core::*;
