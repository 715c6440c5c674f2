//! Application state for the scheduling API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::query::QueryCache;
use crate::validation::ValidationEngine;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, a validation engine built from it, and the query
/// result cache.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Validation engine bound to the configuration.
    engine: Arc<ValidationEngine>,
    /// Cache for `/requests/query` results.
    cache: QueryCache,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let engine = ValidationEngine::new(config.config().clone());
        let cache = QueryCache::from_rules(config.business());
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            cache,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the validation engine.
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    /// Returns the query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
