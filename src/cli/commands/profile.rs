//! Profile command handlers: whoami, update, passwd.

use anyhow::Result;

use super::{MIN_PASSWORD_LEN, prompt, require_session, services};
use crate::config::Config;

pub async fn whoami(config: &Config) -> Result<()> {
    let (session, _, _) = services(config)?;
    require_session(&session)?;

    let user = session.current_user().await?;
    println!("{} <{}>", user.username, user.email);
    if !user.is_active {
        println!("  (account inactive)");
    }
    Ok(())
}

pub async fn update(
    config: &Config,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let (session, _, _) = services(config)?;
    require_session(&session)?;

    if username.is_none() && email.is_none() {
        anyhow::bail!("Nothing to change; pass --username and/or --email");
    }

    // Pre-fill whichever field wasn't given from the current record.
    let current = session.current_user().await?;
    let username = username.unwrap_or(current.username);
    let email = email.unwrap_or(current.email);
    if username.is_empty() || email.is_empty() {
        anyhow::bail!("Username and email cannot be empty");
    }

    let user = session.update_profile(&username, &email).await?;
    println!("✓ Profile updated: {} <{}>", user.username, user.email);
    Ok(())
}

pub async fn passwd(config: &Config) -> Result<()> {
    let (session, _, _) = services(config)?;
    require_session(&session)?;

    let current = prompt("Current password: ")?;
    let new = prompt("New password: ")?;
    let confirm = prompt("Confirm new password: ")?;

    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        anyhow::bail!("All password fields are required");
    }
    if new.len() < MIN_PASSWORD_LEN {
        anyhow::bail!("New password must be at least {MIN_PASSWORD_LEN} characters");
    }
    if new != confirm {
        anyhow::bail!("New passwords do not match");
    }

    session.change_password(&current, &new).await?;
    println!("✓ Password changed");
    Ok(())
}
