//! Application Factory
//!
//! This module provides factory functions for creating and initializing the
//! AppState with the store, identity policy and guard the configuration asks
//! for.

use std::sync::Arc;

use crate::core::app_state::AppState;
use crate::core::config::Config;
use crate::identity::create_identity_assigner;
use crate::service::PersonService;
use crate::storage::{DocumentStore, MemoryStore, StorageImpl, StorageType};
use crate::types::error::{PhonebookError, Result};
use crate::validation::ValidationGuard;
use crate::log_info;

/// Enum to hold different AppState configurations.
///
/// The server matches on this once and then runs with a concrete store type.
pub enum ConfiguredAppState {
    /// Configuration using the in-memory list backend
    Memory {
        /// The application state with MemoryStore
        app_state: AppState<MemoryStore>,
    },
    /// Configuration using the document collection backend
    Document {
        /// The application state with DocumentStore
        app_state: AppState<DocumentStore>,
    },
}

impl ConfiguredAppState {
    /// Get the HTTP address from config
    pub fn http_addr(&self) -> std::net::SocketAddr {
        self.config().server.http_addr
    }

    /// The configuration the state was built from
    pub fn config(&self) -> &Config {
        match self {
            ConfiguredAppState::Memory { app_state } => &app_state.config,
            ConfiguredAppState::Document { app_state } => &app_state.config,
        }
    }
}

/// Create AppState based on configuration
///
/// Validates the configuration, builds the identity assigner and the
/// selected store, and seeds the store when asked to.
pub fn create_app_state(config: Config) -> Result<ConfiguredAppState> {
    config.validate()?;
    log_info!(
        "Creating AppState with storage {:?}, identity {:?}, unique names {}",
        config.storage.backend,
        config.identity.policy,
        config.validation.unique_names
    );

    match config.storage.backend {
        StorageType::Memory => {
            let app_state = build_app_state(MemoryStore::new(), config)?;
            Ok(ConfiguredAppState::Memory { app_state })
        }
        StorageType::Document => {
            let store = DocumentStore::with_schema(config.storage.schema);
            let app_state = build_app_state(store, config)?;
            Ok(ConfiguredAppState::Document { app_state })
        }
    }
}

/// Wire one store into a service and state
pub fn build_app_state<S: StorageImpl>(store: S, config: Config) -> Result<AppState<S>> {
    let identity = create_identity_assigner(
        config.identity.policy,
        config.identity.random_upper_bound,
    );
    let guard = ValidationGuard::new(config.validation.unique_names);
    let service = PersonService::new(Arc::new(store), identity, guard);

    if config.storage.seed_sample_data {
        let seeded = service
            .seed_sample_data()
            .map_err(|e| PhonebookError::config(format!("Seeding sample data failed: {}", e)))?;
        log_info!("Seeded {} sample contacts", seeded);
    }

    Ok(AppState::new(Arc::new(service), config))
}
