//! Auth command handlers: register, login, logout.

use anyhow::Result;

use super::{MIN_PASSWORD_LEN, prompt, services};
use crate::cli::term::TermNavigator;
use crate::config::Config;

pub async fn register(
    config: &Config,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<()> {
    let (session, _, _) = services(config)?;
    let mut nav = TermNavigator;
    if session.redirect_if_authenticated(&mut nav) {
        return Ok(());
    }

    let password = match password {
        Some(password) => password,
        None => {
            let first = prompt("Password: ")?;
            let second = prompt("Confirm password: ")?;
            if first != second {
                anyhow::bail!("Passwords do not match");
            }
            first
        }
    };
    if password.len() < MIN_PASSWORD_LEN {
        anyhow::bail!("Password must be at least {MIN_PASSWORD_LEN} characters");
    }

    let profile = session.register(username, email, &password).await?;
    println!("✓ Registered and logged in as {}", profile.username);
    Ok(())
}

pub async fn login(config: &Config, username: &str, password: Option<String>) -> Result<()> {
    let (session, _, store) = services(config)?;
    let mut nav = TermNavigator;
    if session.redirect_if_authenticated(&mut nav) {
        return Ok(());
    }

    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password are required");
    }

    let profile = session.login(username, &password).await?;
    println!("✓ Logged in as {}", profile.username);
    println!("  Session saved to: {}", store.path().display());
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    let (session, _, _) = services(config)?;
    let mut nav = TermNavigator;

    if session.logout(&mut nav)? {
        println!("✓ Logged out");
    } else {
        println!("Not logged in (no session found).");
    }
    Ok(())
}
