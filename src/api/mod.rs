//! Gateway to the habit service REST API.
//!
//! Everything that crosses the wire goes through [`client::ApiClient`];
//! failures are normalized into [`error::ApiError`] before they reach the
//! rest of the crate.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiErrorKind};
