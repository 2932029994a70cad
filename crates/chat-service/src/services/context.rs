//! Service context - dependency container for services
//!
//! Holds the store, the wall clock, and the sync configuration.

use std::sync::Arc;

use chat_common::SyncConfig;
use chat_core::{SharedClock, SyncStore, SystemClock, Timestamp};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every clone shares the same store.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn SyncStore>,
    clock: SharedClock,
    config: SyncConfig,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn SyncStore>, clock: SharedClock, config: SyncConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the shared store
    pub fn store(&self) -> &dyn SyncStore {
        self.store.as_ref()
    }

    /// Get an owned handle to the store, for background tasks
    pub fn store_handle(&self) -> Arc<dyn SyncStore> {
        Arc::clone(&self.store)
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Current wall-clock instant
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &self.store.stats())
            .field("clock", &self.clock)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn SyncStore>>,
    clock: Option<SharedClock>,
    config: Option<SyncConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn SyncStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Clock used for health timestamps; should be the store's clock
    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// The clock defaults to the system clock and the configuration to
    /// [`SyncConfig::default`].
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if no store was provided
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::internal("store is required"))?,
            self.clock.unwrap_or_else(SystemClock::shared),
            self.config.unwrap_or_default(),
        ))
    }
}
