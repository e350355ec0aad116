//! Application context and initialization logic.
//! This module loads and validates configuration and opens the state store
//! shared by the relay and the dashboard processes.

mod error;
mod metrics;

use std::sync::Arc;

pub use error::AppContextError;
pub use metrics::AppMetrics;

use crate::{
    config::AppConfig,
    persistence::{EventLog, FileStateStore, StateStore, StatusRepository},
};

/// The application context, holding configuration and the state store.
pub struct AppContext {
    /// Shared application configuration.
    pub config: AppConfig,

    /// The raw state store.
    pub store: Arc<dyn StateStore>,

    /// Typed access to the status records.
    pub statuses: StatusRepository,

    /// The shared event history.
    pub event_log: Arc<EventLog>,
}

impl AppContext {
    /// Wires a context around an already loaded configuration and store.
    pub fn new(config: AppConfig, store: Arc<dyn StateStore>) -> Self {
        let statuses = StatusRepository::new(Arc::clone(&store));
        let event_log = Arc::new(EventLog::new(Arc::clone(&store)));
        Self { config, store, statuses, event_log }
    }
}

/// A builder for the `AppContext`, allowing configuration overrides.
pub struct AppContextBuilder {
    /// Optional configuration directory to load settings from.
    config_dir: Option<String>,

    /// Optional override for the dashboard listen address.
    listen_address_override: Option<String>,
}

impl AppContextBuilder {
    /// Creates a new `AppContextBuilder` with an optional configuration
    /// directory.
    pub fn new(config_dir: Option<String>) -> Self {
        Self { config_dir, listen_address_override: None }
    }

    /// Sets a dashboard listen address override.
    pub fn listen_address(mut self, address: Option<String>) -> Self {
        self.listen_address_override = address;
        self
    }

    /// Loads configuration and opens the file-backed state store.
    pub fn build(self) -> Result<AppContext, AppContextError> {
        tracing::debug!("Loading application configuration...");
        let mut config = AppConfig::new(self.config_dir.as_deref())?;
        tracing::debug!(state = ?config.state, "Configuration loaded.");

        if let Some(address) = self.listen_address_override {
            tracing::info!(listen_address = %address, "Overriding dashboard listen address.");
            config.server.listen_address = address;
        }

        if config.uses_default_secret() {
            tracing::warn!(
                "Using the built-in default unlock secret. Set UNLOCK_PASSWORD or unlock_secret \
                 before deploying."
            );
        }

        let store: Arc<dyn StateStore> = Arc::new(FileStateStore::new(config.state.clone()));
        Ok(AppContext::new(config, store))
    }
}
