//! # haven-rest - Care-Home Administration REST API
//!
//! This crate provides the HTTP surface of the Haven backend: a JSON REST
//! API for administering a care-home organization. It covers authentication
//! with email OTP verification, user accounts, the four role-scoped profile
//! collections (caregivers, healthcare professionals, residents, interview
//! candidates), documents, the company-info singleton, care plans,
//! timesheets, and attendance.
//!
//! ## Features
//!
//! - **Token auth**: opaque bearer access/refresh tokens with rotation
//! - **OTP verification**: signup and password reset run through mailed
//!   six-digit codes
//! - **Role gating**: administrative routes require the ADMINISTRATOR role
//! - **Search and pagination**: every list endpoint shares the
//!   `page`/`limit`/`search_field`/`search_text` parameters, dispatched
//!   against per-entity field tables
//! - **Relation expansion**: lists join referenced users before searching,
//!   so searches over joined fields behave as expected
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use haven_rest::{create_app, ServerConfig};
//! use haven_rest::mailer::LogMailer;
//! use haven_store::backends::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryStore::new();
//!     let app = create_app(store, Arc::new(LogMailer));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Response envelope
//!
//! Every response is a JSON object with a `success` flag. Successful
//! responses carry `data` and/or `message`; paginated lists add
//! `totalPages`, `currentPage`, `total`, and `limit`. Errors carry
//! `message` only, and 500 responses never echo the underlying error.
//!
//! ## Configuration
//!
//! The server is configured via `HAVEN_*` environment variables; see
//! [`config::ServerConfig`] for the full table.
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and HTTP status mapping
//! - [`state`] - Application state (store, config, sessions, mailer)
//! - [`auth`] - Sessions, password hashing, OTP generation
//! - [`mailer`] - OTP delivery
//! - [`extractors`] - Axum extractors for list parameters and uploads
//! - [`models`] - Request bodies
//! - [`responses`] - The response envelope
//! - [`handlers`] - HTTP request handlers per resource
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use haven_store::DocumentStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::mailer::OtpMailer;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default
/// settings. For more control, use [`create_app_with_config`].
pub fn create_app<S>(store: S, mailer: Arc<dyn OtpMailer>) -> Router
where
    S: DocumentStore,
{
    create_app_with_config(store, ServerConfig::default(), mailer)
}

/// Creates the Axum application with custom configuration.
///
/// Sets up the complete API: state, routes, tracing, timeout, and CORS
/// when enabled.
pub fn create_app_with_config<S>(
    store: S,
    config: ServerConfig,
    mailer: Arc<dyn OtpMailer>,
) -> Router
where
    S: DocumentStore,
{
    info!(base_url = %config.base_url, "creating REST API server");

    let state = AppState::new(Arc::new(store), config.clone(), mailer);

    let router = routing::api_router(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("haven_rest={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
