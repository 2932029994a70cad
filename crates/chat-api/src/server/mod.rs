//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use chat_common::{AppConfig, AppError};
use chat_core::{SharedClock, SystemClock};
use chat_service::ServiceContextBuilder;
use chat_store::MemoryStore;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Create AppState backed by a fresh in-memory store on the system clock
pub fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    create_app_state_with_clock(config, SystemClock::shared())
}

/// Create AppState with an explicit clock, shared by the store and the context
pub fn create_app_state_with_clock(
    config: AppConfig,
    clock: SharedClock,
) -> Result<AppState, AppError> {
    let store = Arc::new(MemoryStore::new(Arc::clone(&clock)));

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .clock(clock)
        .config(config.sync.clone())
        .build()
        .map_err(AppError::internal)?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn run_server<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

/// Run the complete server with configuration until Ctrl-C
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config)?;
    let reaper = state.reaper();
    let reaper_task = Arc::clone(&reaper).start();

    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(addr.as_str()).await?;

    let result = run_server(listener, app, shutdown_signal()).await;

    reaper.stop();
    if let Some(task) = reaper_task {
        if let Err(e) = task.await {
            error!(error = %e, "Presence reaper task failed");
        }
    }
    info!("Server shutdown complete");

    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
