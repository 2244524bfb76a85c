//! JSON fixture helpers for integration tests.
//!
//! Builds the payload shapes the habit service sends, plus a client wired
//! to a mock server with a pre-authenticated session in a temp home.

#![allow(dead_code)]

use serde_json::{Value, json};
use tempfile::TempDir;

use habitctl::api::ApiClient;
use habitctl::config::Config;
use habitctl::store::SessionStore;

pub const TEST_TOKEN: &str = "test-token-1234567890";

pub fn habit(id: i64, title: &str) -> Value {
    json!({ "id": id, "title": title, "owner_id": 1 })
}

pub fn token(access_token: &str) -> Value {
    json!({ "access_token": access_token, "token_type": "bearer" })
}

pub fn user(id: i64, username: &str, email: &str) -> Value {
    json!({ "id": id, "username": username, "email": email, "is_active": true })
}

pub fn completed_today(done: bool) -> Value {
    json!({ "completed_today": done })
}

pub fn stats(current_streak: u32, longest_streak: u32, total_completions: u32, rate: u32) -> Value {
    json!({
        "current_streak": current_streak,
        "longest_streak": longest_streak,
        "total_completions": total_completions,
        "completion_rate_last_30_days": rate,
    })
}

pub fn detail(message: &str) -> Value {
    json!({ "detail": message })
}

/// A store in `dir` holding a logged-in session.
pub fn authed_store(dir: &TempDir) -> SessionStore {
    let store = SessionStore::at(dir.path().join("session.json"));
    store
        .set_auth(TEST_TOKEN, None)
        .expect("seed session store");
    store
}

/// A client pointed at the mock server, authenticated via `authed_store`.
pub fn client(server_uri: &str, dir: &TempDir) -> ApiClient {
    let store = authed_store(dir);
    ApiClient::new(server_uri, &Config::default(), store).expect("build client")
}

/// A client with an *empty* session store (no token on disk).
pub fn anon_client(server_uri: &str, dir: &TempDir) -> ApiClient {
    let store = SessionStore::at(dir.path().join("session.json"));
    ApiClient::new(server_uri, &Config::default(), store).expect("build client")
}
