//! Application state for the payroll HTTP API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex};

use crate::config::PayrollConfig;
use crate::notify::Notifier;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains the validated reference data, the payroll store and the
/// notification channel. The store sits behind a mutex because run
/// operations mutate it; reference data is immutable for the process
/// lifetime.
#[derive(Clone)]
pub struct AppState {
    config: Arc<PayrollConfig>,
    store: Arc<Mutex<MemoryStore>>,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: PayrollConfig, store: MemoryStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
            notifier,
        }
    }

    /// Returns the reference data set.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the store mutex.
    pub fn store(&self) -> &Mutex<MemoryStore> {
        &self.store
    }

    /// Returns the notification channel.
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state.
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
