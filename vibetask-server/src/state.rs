//! Application state shared across handlers

use std::sync::Arc;

use crate::db::TaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }
}
