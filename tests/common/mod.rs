//! Test helpers for Web API tests.
//!
//! Builds a router over an in-memory database, an in-process session
//! store and a temporary blob root, with one seeded user.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderName;
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tempfile::TempDir;

use filestash::auth::MemorySessionStore;
use filestash::db::{NewUser, User, UserRepository};
use filestash::web::handlers::AppState;
use filestash::web::router::create_router;
use filestash::{hash_password, Database};

/// Seeded user credentials.
pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "pw";

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub sessions: Arc<MemorySessionStore>,
    pub blob_dir: TempDir,
    pub user: User,
}

/// Create a test application with the default blob writer.
pub async fn create_test_app() -> TestApp {
    create_test_app_with(|state| state).await
}

/// Create a test application, letting the caller adjust the state.
pub async fn create_test_app_with(customize: impl FnOnce(AppState) -> AppState) -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let user = UserRepository::new(db.pool())
        .create(&NewUser::new(EMAIL, hash_password(PASSWORD)))
        .await
        .expect("Failed to seed user");

    let sessions = Arc::new(MemorySessionStore::new());
    let blob_dir = TempDir::new().expect("Failed to create blob dir");
    let blob_root = blob_dir.path().join("files_manager");

    let state = customize(AppState::new(db.clone(), sessions.clone(), blob_root));
    let router = create_router(Arc::new(state));
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        db,
        sessions,
        blob_dir,
        user,
    }
}

/// `X-Token` header name.
pub fn token_header() -> HeaderName {
    HeaderName::from_static("x-token")
}

/// `Authorization` header value for Basic credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Sign in and return the token.
pub async fn sign_in(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}

/// Register a user and sign in as them.
pub async fn register_and_sign_in(server: &TestServer, email: &str, password: &str) -> String {
    server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    sign_in(server, email, password).await
}

/// Create an entry and return the response body.
pub async fn create_file(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/files")
        .add_header(token_header(), token.to_string())
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
