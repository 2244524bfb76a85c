//! Subcommand handlers.

pub mod auth;
pub mod config;
pub mod habits;
pub mod profile;
pub mod stats;

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::api::ApiClient;
use crate::cli::term::TermNavigator;
use crate::config::Config as AppConfig;
use crate::session::SessionManager;
use crate::store::SessionStore;

/// Passwords the service would reject anyway are caught before the call.
pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Wires up the service objects every command needs.
pub(crate) fn services(config: &AppConfig) -> Result<(SessionManager, ApiClient, SessionStore)> {
    let store = SessionStore::new();
    let api = ApiClient::from_config(config, store.clone())?;
    let session = SessionManager::new(api.clone(), store.clone());
    Ok((session, api, store))
}

/// Guard for protected commands: prints login guidance and errors out when
/// no session is stored.
pub(crate) fn require_session(session: &SessionManager) -> Result<()> {
    let mut nav = TermNavigator;
    if session.require_auth(&mut nav) {
        Ok(())
    } else {
        anyhow::bail!("not authenticated")
    }
}

/// Reads one trimmed line from stdin after printing a prompt.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
