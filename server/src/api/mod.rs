//! HTTP API module for the phonebook server

/// Error to response mapping
pub mod api_error;

/// HTTP request handlers
pub mod api_handlers;

/// Router and server lifecycle
pub mod api_server;

// Re-export commonly used items
pub use api_error::{ApiError, ApiResult, ErrorResponse};
pub use api_server::{create_app, create_router, start_api_server};
