//! Application State Management
//!
//! This module defines the central AppState handed to every HTTP handler.
//! It follows the factory pattern for clean initialization.

use std::sync::Arc;
use std::time::Instant;

use crate::core::config::Config;
use crate::service::PersonService;
use crate::storage::StorageImpl;

/// Central application state holding all services and components
pub struct AppState<S: StorageImpl> {
    /// Person CRUD service over the configured store
    pub persons: Arc<PersonService<S>>,

    /// Application configuration
    pub config: Arc<Config>,

    /// When the process started serving, for uptime reporting
    pub started_at: Instant,
}

// Manual Clone implementation for AppState that doesn't require S: Clone
// Since the service is held in an Arc, cloning only bumps reference counts
impl<S: StorageImpl> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            persons: self.persons.clone(),
            config: self.config.clone(),
            started_at: self.started_at,
        }
    }
}

impl<S: StorageImpl> AppState<S> {
    /// Create a new AppState with the given service and configuration
    /// This is called by the factory after all services are initialized
    pub fn new(persons: Arc<PersonService<S>>, config: Config) -> Self {
        Self {
            persons,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
