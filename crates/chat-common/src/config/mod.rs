//! Configuration structs

mod app_config;
mod sync_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, Environment, ServerConfig,
};
pub use sync_config::SyncConfig;
