//! Application state
//!
//! Holds the shared state for the Axum application: the service context
//! (which owns the store), the presence reaper, and configuration.

use std::sync::Arc;

use chat_common::AppConfig;
use chat_service::{PresenceReaper, ServiceContext};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    reaper: Arc<PresenceReaper>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState; the reaper sweeps the context's store
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let reaper = PresenceReaper::new(service_context.store_handle(), &config.sync);
        Self {
            service_context: Arc::new(service_context),
            reaper: Arc::new(reaper),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Handle to the presence reaper, for starting and stopping it
    pub fn reaper(&self) -> Arc<PresenceReaper> {
        Arc::clone(&self.reaper)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("reaper", &self.reaper)
            .field("config", &"AppConfig")
            .finish()
    }
}
