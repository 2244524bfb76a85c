//! Wire types for the habit service API.
//!
//! Response shapes mirror what the service actually sends, including its
//! quirks: habit payloads may omit `description`, and the status-bearing
//! responses tolerate missing fields by defaulting to zero values.

use serde::{Deserialize, Serialize};

// --- Requests ---

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Create/update payload for a habit.
#[derive(Debug, Clone, Serialize)]
pub struct HabitPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

// --- Responses ---

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
}

/// A habit as the service reports it.
///
/// The list/detail endpoints drop `description` from their responses, so it
/// deserializes as `None` there even for habits created with one.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CompletedToday {
    #[serde(default)]
    pub completed_today: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StreakResponse {
    #[serde(default)]
    pub streak: u32,
}

/// Server-computed aggregates for one habit.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct HabitStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
    pub completion_rate_last_30_days: u32,
}
