//! The habit service API client.
//!
//! One generic [`ApiClient::request`] builds every call: base URL + endpoint
//! path, JSON body, and a bearer token read from the session store unless
//! the endpoint opts out. Per-endpoint methods are thin typed wrappers with
//! the method/path/auth fixed per call; no business logic lives here.

use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use super::error::ApiError;
use super::types::{
    CompletedToday, Habit, HabitPayload, HabitStats, LoginRequest, PasswordChange, ProfileUpdate,
    RegisterRequest, StreakResponse, TokenResponse, UserResponse,
};
use crate::config::Config;
use crate::store::SessionStore;

/// Default base URL for the habit service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Whether a call carries the `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    None,
}

/// Habit service API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: SessionStore,
}

impl ApiClient {
    /// Creates a client against an explicit base URL.
    pub fn new(base_url: &str, config: &Config, store: SessionStore) -> Result<Self> {
        validate_url(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            store,
        })
    }

    /// Creates a client with the base URL resolved from env > config > default.
    pub fn from_config(config: &Config, store: SessionStore) -> Result<Self> {
        let base_url = resolve_base_url(config.effective_base_url())?;
        Self::new(&base_url, config, store)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and normalizes the result.
    ///
    /// The response body is parsed as JSON with an empty-object fallback:
    /// the service is trusted to answer some calls with no body at all, and
    /// that must not fail the call. Status and transport failures become
    /// [`ApiError`]s, logged before they are returned.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        auth: Auth,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut req = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if auth == Auth::Bearer {
            match self.store.token() {
                Ok(Some(token)) => req = req.bearer_auth(token),
                Ok(None) => {}
                Err(err) => warn!("session store unreadable, sending without auth: {err:#}"),
            }
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|err| {
            error!(%url, "request failed: {err}");
            ApiError::transport(err.to_string())
        })?;

        let status = response.status();
        let raw = response.text().await.map_err(|err| {
            error!(%url, "failed to read response body: {err}");
            ApiError::transport(err.to_string())
        })?;

        let payload: Value =
            serde_json::from_str(&raw).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        if !status.is_success() {
            let err = ApiError::http_status(status.as_u16(), &payload, &raw);
            error!(%url, status = status.as_u16(), "service error: {}", err.message);
            return Err(err);
        }

        Ok(payload)
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        auth: Auth,
        what: &str,
    ) -> Result<T, ApiError> {
        let payload = self.request(method, endpoint, body, auth).await?;
        serde_json::from_value(payload).map_err(|err| {
            let decode = ApiError::decode(what, &err);
            error!(%endpoint, "decode failed: {err}");
            decode
        })
    }

    fn encode(body: &impl Serialize) -> Value {
        // Request types serialize infallibly; a panic here is a programming error.
        serde_json::to_value(body).unwrap_or(Value::Null)
    }

    // --- Users ---

    pub async fn register(&self, payload: &RegisterRequest) -> Result<UserResponse, ApiError> {
        self.request_as(
            Method::POST,
            "/users/register",
            Some(&Self::encode(payload)),
            Auth::None,
            "register",
        )
        .await
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.request_as(
            Method::POST,
            "/users/login",
            Some(&Self::encode(payload)),
            Auth::None,
            "login",
        )
        .await
    }

    pub async fn current_user(&self) -> Result<UserResponse, ApiError> {
        self.request_as(Method::GET, "/users/me", None, Auth::Bearer, "current user")
            .await
    }

    pub async fn update_profile(&self, payload: &ProfileUpdate) -> Result<UserResponse, ApiError> {
        self.request_as(
            Method::PUT,
            "/users/me",
            Some(&Self::encode(payload)),
            Auth::Bearer,
            "profile update",
        )
        .await
    }

    pub async fn change_password(&self, payload: &PasswordChange) -> Result<(), ApiError> {
        self.request(
            Method::PUT,
            "/users/me/password",
            Some(&Self::encode(payload)),
            Auth::Bearer,
        )
        .await
        .map(|_| ())
    }

    // --- Habits ---
    // The service spells its habit routes "habbits"; the paths are part of
    // the contract and kept verbatim.

    pub async fn create_habit(&self, payload: &HabitPayload) -> Result<Habit, ApiError> {
        self.request_as(
            Method::POST,
            "/habbits/create",
            Some(&Self::encode(payload)),
            Auth::Bearer,
            "habit",
        )
        .await
    }

    pub async fn habits(&self) -> Result<Vec<Habit>, ApiError> {
        self.request_as(
            Method::GET,
            "/habbits/habbits",
            None,
            Auth::Bearer,
            "habit list",
        )
        .await
    }

    pub async fn habit(&self, id: i64) -> Result<Habit, ApiError> {
        self.request_as(
            Method::GET,
            &format!("/habbits/habbits/{id}"),
            None,
            Auth::Bearer,
            "habit",
        )
        .await
    }

    pub async fn update_habit(&self, id: i64, payload: &HabitPayload) -> Result<Habit, ApiError> {
        self.request_as(
            Method::PUT,
            &format!("/habbits/habbits/{id}"),
            Some(&Self::encode(payload)),
            Auth::Bearer,
            "habit",
        )
        .await
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("/habbits/habbits/{id}"),
            None,
            Auth::Bearer,
        )
        .await
        .map(|_| ())
    }

    // --- Completions ---

    pub async fn complete(&self, habit_id: i64) -> Result<(), ApiError> {
        self.request(
            Method::POST,
            &format!("/completions/{habit_id}"),
            None,
            Auth::Bearer,
        )
        .await
        .map(|_| ())
    }

    pub async fn uncomplete(&self, habit_id: i64) -> Result<(), ApiError> {
        self.request(
            Method::DELETE,
            &format!("/completions/{habit_id}"),
            None,
            Auth::Bearer,
        )
        .await
        .map(|_| ())
    }

    pub async fn completed_today(&self, habit_id: i64) -> Result<bool, ApiError> {
        let today: CompletedToday = self
            .request_as(
                Method::GET,
                &format!("/completions/{habit_id}/today"),
                None,
                Auth::Bearer,
                "completed-today",
            )
            .await?;
        Ok(today.completed_today)
    }

    pub async fn streak(&self, habit_id: i64) -> Result<u32, ApiError> {
        let streak: StreakResponse = self
            .request_as(
                Method::GET,
                &format!("/completions/{habit_id}/streak"),
                None,
                Auth::Bearer,
                "streak",
            )
            .await?;
        Ok(streak.streak)
    }

    pub async fn stats(&self, habit_id: i64) -> Result<HabitStats, ApiError> {
        self.request_as(
            Method::GET,
            &format!("/completions/{habit_id}/stats"),
            None,
            Auth::Bearer,
            "stats",
        )
        .await
    }
}

/// Resolves the base URL with precedence: env > config > default.
pub fn resolve_base_url(config_base_url: Option<&str>) -> Result<String> {
    if let Ok(env_url) = std::env::var("HABITCTL_BASE_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(DEFAULT_BASE_URL.to_string())
}

/// Validates that a base URL is well-formed http(s).
fn validate_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).with_context(|| format!("Invalid base URL: {raw}"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("Base URL must use http or https: {raw}");
    }
    Ok(())
}
