//! Authentication: sessions, credentials, and the request extractor.
//!
//! Clients authenticate with opaque bearer tokens resolved through an
//! in-process [`SessionStore`]. Login issues an access/refresh token pair;
//! refresh rotates both. Tokens carry no claims of their own, the store is
//! the single source of truth, and expired entries are pruned on access.
//!
//! Passwords are stored as argon2 PHC strings and verified at login. OTPs
//! are six random digits with a configurable lifetime.

use std::collections::HashMap;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::{DateTime, Duration, Utc};
use haven_store::types::Role;
use haven_store::DocumentStore;
use parking_lot::RwLock;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// The user's record id.
    pub id: String,
    /// The user's email.
    pub email: String,
    /// The user's role.
    pub role: Role,
}

impl AuthUser {
    /// Fails unless the caller is an administrator.
    pub fn require_admin(&self) -> RestResult<()> {
        if self.role == Role::Administrator {
            Ok(())
        } else {
            Err(RestError::Forbidden {
                message: "Administrator access required".to_string(),
            })
        }
    }
}

/// An access/refresh token pair, as returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// The short-lived access token.
    pub access_token: String,
    /// The long-lived refresh token.
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
struct Session {
    user: AuthUser,
    expires_at: DateTime<Utc>,
}

/// In-process session storage for both token kinds.
#[derive(Debug)]
pub struct SessionStore {
    access: RwLock<HashMap<String, Session>>,
    refresh: RwLock<HashMap<String, Session>>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionStore {
    /// Creates a store with the given token lifetimes.
    pub fn new(access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            access: RwLock::new(HashMap::new()),
            refresh: RwLock::new(HashMap::new()),
            access_ttl: Duration::seconds(access_ttl_secs as i64),
            refresh_ttl: Duration::seconds(refresh_ttl_secs as i64),
        }
    }

    /// Issues a fresh token pair for a user.
    pub fn issue(&self, user: AuthUser) -> TokenPair {
        let pair = TokenPair {
            access_token: opaque_token(),
            refresh_token: opaque_token(),
        };
        let now = Utc::now();
        self.access.write().insert(
            pair.access_token.clone(),
            Session {
                user: user.clone(),
                expires_at: now + self.access_ttl,
            },
        );
        self.refresh.write().insert(
            pair.refresh_token.clone(),
            Session {
                user,
                expires_at: now + self.refresh_ttl,
            },
        );
        pair
    }

    /// Resolves an access token, pruning it if expired.
    pub fn resolve(&self, token: &str) -> Option<AuthUser> {
        let mut sessions = self.access.write();
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Rotates a refresh token into a new pair. The old refresh token is
    /// consumed whether or not it was still valid.
    pub fn rotate(&self, refresh_token: &str) -> Option<TokenPair> {
        let session = self.refresh.write().remove(refresh_token)?;
        if session.expires_at <= Utc::now() {
            return None;
        }
        Some(self.issue(session.user))
    }

    /// Drops every session belonging to a user. Called on password change.
    pub fn revoke_user(&self, user_id: &str) {
        self.access
            .write()
            .retain(|_, session| session.user.id != user_id);
        self.refresh
            .write()
            .retain(|_, session| session.user.id != user_id);
    }
}

fn opaque_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Hashes a password into an argon2 PHC string.
pub fn hash_password(plain: &str) -> RestResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| RestError::InternalError {
            message: format!("password hashing failed: {}", err),
        })
}

/// Verifies a password against a stored PHC string.
///
/// A malformed stored hash verifies as false rather than erroring; the
/// caller cannot do anything useful with the distinction.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Generates a six-digit OTP.
pub fn generate_otp() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
}

impl<S> FromRequestParts<AppState<S>> for AuthUser
where
    S: DocumentStore,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| RestError::Unauthorized {
                message: "Missing Authorization header".to_string(),
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| RestError::Unauthorized {
                message: "Authorization header must be a bearer token".to_string(),
            })?;

        state
            .sessions()
            .resolve(token)
            .ok_or_else(|| RestError::Unauthorized {
                message: "Invalid or expired token".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::Administrator,
        }
    }

    #[test]
    fn issue_and_resolve_round_trip() {
        let store = SessionStore::new(60, 120);
        let pair = store.issue(user());
        assert_eq!(store.resolve(&pair.access_token), Some(user()));
        assert_eq!(store.resolve("bogus"), None);
    }

    #[test]
    fn expired_access_token_is_pruned() {
        let store = SessionStore::new(0, 120);
        let pair = store.issue(user());
        assert_eq!(store.resolve(&pair.access_token), None);
        // A second resolve sees the pruned entry gone too.
        assert_eq!(store.resolve(&pair.access_token), None);
    }

    #[test]
    fn rotate_consumes_refresh_token() {
        let store = SessionStore::new(60, 120);
        let pair = store.issue(user());
        let rotated = store.rotate(&pair.refresh_token).unwrap();
        assert!(store.resolve(&rotated.access_token).is_some());
        assert!(store.rotate(&pair.refresh_token).is_none());
    }

    #[test]
    fn revoke_user_drops_all_sessions() {
        let store = SessionStore::new(60, 120);
        let pair = store.issue(user());
        store.revoke_user("u1");
        assert_eq!(store.resolve(&pair.access_token), None);
        assert!(store.rotate(&pair.refresh_token).is_none());
    }

    #[test]
    fn password_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret", "not-a-phc-string"));
    }

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..16 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
