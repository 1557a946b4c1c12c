//! REST API test harness.
//!
//! Provides a configured test server over the in-memory store, plus the
//! seeding helpers the endpoint tests share. The store handle is kept so
//! tests can read server-generated state (like OTPs) that is deliberately
//! never echoed over HTTP.

use std::sync::Arc;

use axum_test::TestServer;
use haven_rest::mailer::LogMailer;
use haven_rest::{routing, AppState, ServerConfig};
use haven_store::backends::MemoryStore;
use haven_store::query::{Condition, Filter};
use haven_store::types::EntityKind;
use haven_store::DocumentStore;
use serde_json::{json, Value};

/// Test harness for REST API testing.
pub struct Harness {
    /// The test server instance.
    pub server: TestServer,

    /// The backing store, for reading state the API never exposes.
    pub store: Arc<MemoryStore>,
}

impl Harness {
    /// Creates a harness with a fresh in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            Arc::clone(&store),
            ServerConfig::for_testing(),
            Arc::new(LogMailer),
        );
        let server = TestServer::new(routing::api_router(state)).unwrap();
        Self { server, store }
    }

    /// Bootstraps the administrator and returns a bearer token for it.
    pub async fn admin_token(&self) -> String {
        let response = self
            .server
            .post("/api/users/seed-admin")
            .json(&json!({"email": "admin@test.example", "password": "admin-pass"}))
            .await;
        assert_eq!(response.status_code(), 201);
        self.login("admin@test.example", "admin-pass").await
    }

    /// Logs in and returns the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({"email": email, "password": password}))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        body["data"]["accessToken"].as_str().unwrap().to_string()
    }

    /// Creates a verified user through the admin API and returns its id.
    pub async fn create_user(&self, token: &str, name: &str, email: &str, role: &str) -> String {
        let response = self
            .server
            .post("/api/users")
            .authorization_bearer(token)
            .json(&json!({
                "name": name,
                "email": email,
                "password": "user-pass",
                "role": role,
            }))
            .await;
        assert_eq!(response.status_code(), 201);
        let body: Value = response.json();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Reads the OTP the server stored for an email.
    pub async fn stored_otp(&self, email: &str) -> String {
        let filter = Filter::all().and(Condition::eq("email", email));
        let user = self
            .store
            .find_one(EntityKind::User, &filter)
            .await
            .unwrap()
            .expect("user should exist");
        user.content["otp"].as_str().unwrap().to_string()
    }
}
