//! Application state for the Haven REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the document store, configuration, the session store,
//! and the OTP mailer.

use std::sync::Arc;

use haven_store::DocumentStore;

use crate::auth::SessionStore;
use crate::config::ServerConfig;
use crate::mailer::OtpMailer;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The document store type (must implement [`DocumentStore`])
pub struct AppState<S> {
    /// The document store.
    store: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Bearer-token sessions.
    sessions: Arc<SessionStore>,

    /// OTP delivery.
    mailer: Arc<dyn OtpMailer>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            sessions: Arc::clone(&self.sessions),
            mailer: Arc::clone(&self.mailer),
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Creates a new AppState with the given store, configuration, and
    /// mailer. The session store is built from the configured TTLs.
    pub fn new(store: Arc<S>, config: ServerConfig, mailer: Arc<dyn OtpMailer>) -> Self {
        let sessions = Arc::new(SessionStore::new(
            config.access_token_ttl,
            config.refresh_token_ttl,
        ));
        Self {
            store,
            config: Arc::new(config),
            sessions,
            mailer,
        }
    }

    /// Returns a reference to the document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns a reference to the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Returns a reference to the OTP mailer.
    pub fn mailer(&self) -> &dyn OtpMailer {
        self.mailer.as_ref()
    }

    /// Returns the base URL used when shaping public file links.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the OTP lifetime in seconds.
    pub fn otp_ttl(&self) -> u64 {
        self.config.otp_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::LogMailer;
    use haven_store::backends::MemoryStore;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            ServerConfig::for_testing(),
            Arc::new(LogMailer),
        );
        assert_eq!(state.base_url(), "http://localhost:0");
        assert_eq!(state.otp_ttl(), 60);
    }

    #[test]
    fn test_app_state_clone() {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            ServerConfig::for_testing(),
            Arc::new(LogMailer),
        );
        let cloned = state.clone();
        assert_eq!(state.base_url(), cloned.base_url());
    }
}
