//! Session lifecycle: login, registration, logout, and auth guards.
//!
//! Navigation is a seam: the manager decides *when* to redirect, a
//! [`Navigator`] decides what a redirect means for the presentation layer
//! (the CLI prints guidance; a richer UI would switch screens).

use anyhow::Result;
use tracing::warn;

use crate::api::ApiClient;
use crate::api::types::{LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, UserResponse};
use crate::store::{SessionStore, UserProfile};

/// The surfaces the client can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Public landing surface, shown after logout.
    Landing,
    /// Login surface, shown when a protected view is hit unauthenticated.
    Login,
    /// The authenticated dashboard.
    Dashboard,
}

/// Presentation-layer navigation sink.
pub trait Navigator {
    fn goto(&mut self, surface: Surface);
}

/// Composes the session store and the API client into the auth flows.
pub struct SessionManager {
    api: ApiClient,
    store: SessionStore,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// True iff a non-empty credential is stored.
    /// An unreadable store counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        match self.store.token() {
            Ok(token) => token.is_some(),
            Err(err) => {
                warn!("session store unreadable: {err:#}");
                false
            }
        }
    }

    /// Logs in and stores the token plus a minimal profile derived from the
    /// submitted username (the login response carries no profile).
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile> {
        let token = self
            .api
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        let profile = UserProfile {
            username: username.to_string(),
            email: None,
        };
        self.store.set_auth(&token.access_token, Some(&profile))?;
        Ok(profile)
    }

    /// Registers an account, then logs in with the same credentials.
    ///
    /// If the follow-up login fails the account still exists server-side;
    /// the login error propagates and nothing is compensated.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<UserProfile> {
        self.api
            .register(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.login(username, password).await
    }

    /// Clears the session and navigates to the landing surface.
    /// Returns whether a session existed.
    pub fn logout(&self, nav: &mut dyn Navigator) -> Result<bool> {
        let had_session = self.store.clear_auth()?;
        nav.goto(Surface::Landing);
        Ok(had_session)
    }

    /// Guard for protected views: true when authenticated, otherwise
    /// navigates to the login surface and returns false.
    pub fn require_auth(&self, nav: &mut dyn Navigator) -> bool {
        if self.is_authenticated() {
            true
        } else {
            nav.goto(Surface::Login);
            false
        }
    }

    /// Inverse guard for public-only views: navigates to the dashboard and
    /// returns true when already logged in.
    pub fn redirect_if_authenticated(&self, nav: &mut dyn Navigator) -> bool {
        if self.is_authenticated() {
            nav.goto(Surface::Dashboard);
            true
        } else {
            false
        }
    }

    /// The cached profile, without hitting the network. May be stale.
    pub fn cached_user(&self) -> Option<UserProfile> {
        self.store.user().ok().flatten()
    }

    /// Fetches the authoritative user record.
    pub async fn current_user(&self) -> Result<UserResponse> {
        Ok(self.api.current_user().await?)
    }

    /// Updates the profile server-side and refreshes the cached copy.
    pub async fn update_profile(&self, username: &str, email: &str) -> Result<UserResponse> {
        let user = self
            .api
            .update_profile(&ProfileUpdate {
                username: username.to_string(),
                email: email.to_string(),
            })
            .await?;

        self.store.set_user(&UserProfile {
            username: user.username.clone(),
            email: Some(user.email.clone()),
        })?;
        Ok(user)
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        Ok(self
            .api
            .change_password(&PasswordChange {
                old_password: old_password.to_string(),
                new_password: new_password.to_string(),
            })
            .await?)
    }
}
