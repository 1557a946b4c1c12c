//! Error types for the Haven REST API.
//!
//! This module defines all error types used throughout the REST layer, with
//! automatic conversion to the uniform `{success, message}` response
//! envelope.
//!
//! # Error Mapping
//!
//! Store errors are automatically mapped to HTTP status codes:
//!
//! | Store Error | HTTP Status |
//! |-------------|-------------|
//! | EntityError::NotFound | 404 |
//! | EntityError::Duplicate | 400 |
//! | ProfileError::UserNotFound | 404 |
//! | ProfileError::RoleMismatch | 400 |
//! | ProfileError::DuplicateProfile | 400 |
//! | SearchError::UnknownField | 400 |
//! | ValidationError | 400 |
//! | OwnershipError | 403 |
//! | BackendError | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use haven_store::error::StoreError;
use std::fmt;
use tracing::error;

/// The primary error type for REST API operations.
///
/// This enum provides semantic error types that map cleanly to HTTP status
/// codes and envelope messages.
#[derive(Debug)]
pub enum RestError {
    /// Bad request - validation or guard failure (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Missing or invalid credentials (HTTP 401).
    Unauthorized {
        /// Error message.
        message: String,
    },

    /// Authenticated but not permitted (HTTP 403).
    Forbidden {
        /// Error message.
        message: String,
    },

    /// Record not found (HTTP 404).
    NotFound {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500). The message is logged, never echoed.
    InternalError {
        /// Error message, for the log only.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            RestError::Forbidden { message } => write!(f, "Forbidden: {}", message),
            RestError::NotFound { message } => write!(f, "Not found: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Convenience constructor for 400 responses.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Convenience constructor for 404 responses.
    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::NotFound {
            message: message.into(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RestError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            RestError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            RestError::Forbidden { message } => (StatusCode::FORBIDDEN, message),
            RestError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            RestError::InternalError { message } => {
                // Raw failure details go to the log, not the client.
                error!(%message, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let envelope = serde_json::json!({
            "success": false,
            "message": message,
        });
        (status, Json(envelope)).into_response()
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        use haven_store::error::{EntityError, ProfileError};

        match err {
            StoreError::Entity(e) => match e {
                EntityError::NotFound { .. } => RestError::NotFound {
                    message: e.to_string(),
                },
                EntityError::Duplicate { .. } => RestError::BadRequest {
                    message: e.to_string(),
                },
            },
            StoreError::Profile(e) => match e {
                ProfileError::UserNotFound { .. } => RestError::NotFound {
                    message: e.to_string(),
                },
                ProfileError::RoleMismatch { .. } | ProfileError::DuplicateProfile { .. } => {
                    RestError::BadRequest {
                        message: e.to_string(),
                    }
                }
            },
            StoreError::Search(e) => RestError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Validation(e) => RestError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Ownership(e) => RestError::Forbidden {
                message: e.to_string(),
            },
            StoreError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
