//! Server configuration for the Haven REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HAVEN_SERVER_PORT` | 8080 | Server port |
//! | `HAVEN_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `HAVEN_LOG_LEVEL` | info | Log level |
//! | `HAVEN_MAX_BODY_SIZE` | 10485760 | Max request body (bytes) |
//! | `HAVEN_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `HAVEN_ENABLE_CORS` | true | Enable CORS |
//! | `HAVEN_CORS_ORIGINS` | * | Allowed origins |
//! | `HAVEN_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `HAVEN_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `HAVEN_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `HAVEN_ACCESS_TOKEN_TTL` | 3600 | Access token lifetime (seconds) |
//! | `HAVEN_REFRESH_TOKEN_TTL` | 604800 | Refresh token lifetime (seconds) |
//! | `HAVEN_OTP_TTL` | 600 | OTP lifetime (seconds) |
//!
//! # Example
//!
//! ```rust
//! use haven_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

/// Server configuration for the Haven REST API.
///
/// This struct can be constructed from environment variables using
/// [`ServerConfig::from_env`], from command line arguments using
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "haven-server")]
#[command(about = "Haven care-home administration server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "HAVEN_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "HAVEN_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HAVEN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "HAVEN_MAX_BODY_SIZE", default_value = "10485760")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "HAVEN_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "HAVEN_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "HAVEN_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "HAVEN_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "HAVEN_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept,X-Uploaded-Filename,X-Uploaded-Pdf-Filename,X-Uploaded-Image-Filename"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used when shaping public file links).
    #[arg(long, env = "HAVEN_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Access token lifetime in seconds.
    #[arg(long, env = "HAVEN_ACCESS_TOKEN_TTL", default_value = "3600")]
    pub access_token_ttl: u64,

    /// Refresh token lifetime in seconds.
    #[arg(long, env = "HAVEN_REFRESH_TOKEN_TTL", default_value = "604800")]
    pub refresh_token_ttl: u64,

    /// OTP lifetime in seconds.
    #[arg(long, env = "HAVEN_OTP_TTL", default_value = "600")]
    pub otp_ttl: u64,

    /// Email address for the bootstrap administrator account.
    #[arg(
        long,
        env = "HAVEN_SEED_ADMIN_EMAIL",
        default_value = "admin@haven.example"
    )]
    pub seed_admin_email: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 10 * 1024 * 1024, // 10MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers:
                "Content-Type,Authorization,Accept,X-Uploaded-Filename,X-Uploaded-Pdf-Filename,X-Uploaded-Image-Filename"
                    .to_string(),
            base_url: "http://localhost:8080".to_string(),
            access_token_ttl: 3600,
            refresh_token_ttl: 7 * 24 * 3600,
            otp_ttl: 600,
            seed_admin_email: "admin@haven.example".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.access_token_ttl == 0 {
            errors.push("Access token TTL cannot be 0".to_string());
        }

        if self.refresh_token_ttl <= self.access_token_ttl {
            errors.push("Refresh token TTL must exceed access token TTL".to_string());
        }

        if self.otp_ttl == 0 {
            errors.push("OTP TTL cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 10 * 1024 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:0".to_string(),
            access_token_ttl: 60,
            refresh_token_ttl: 120,
            otp_ttl: 60,
            seed_admin_email: "admin@test.example".to_string(),
        }
    }
}
