//! Chat sync server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p chat-api --bin chat-server
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use chat_common::{try_init_tracing_with_config, AppConfig, AppResult, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed");
        eprintln!("chat-server: {e}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.server.port,
        poll_interval_ms = config.sync.poll_interval.as_millis() as u64,
        presence_timeout_secs = config.sync.presence_timeout.as_secs(),
        "Configuration loaded"
    );

    chat_api::run(config).await?;

    Ok(())
}
