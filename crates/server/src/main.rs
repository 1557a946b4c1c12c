//! Haven
//!
//! A care-home administration backend.

use std::sync::Arc;

use clap::Parser;
use haven_rest::mailer::LogMailer;
use haven_rest::{create_app_with_config, init_logging, ServerConfig};
use haven_store::backends::MemoryStore;
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "Starting Haven server"
    );

    let store = MemoryStore::new();
    let app = create_app_with_config(store, config.clone(), Arc::new(LogMailer));
    serve(app, &config).await
}
