//! Habit command handlers: list, add, edit, rm, toggle, streak.

use anyhow::Result;
use chrono::Local;

use super::{prompt, require_session, services};
use crate::cli::term::TermNotifier;
use crate::config::Config;
use crate::habits::{HabitController, HabitEntry};

pub async fn list(config: &Config) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    let controller = HabitController::new(api);
    controller.load_habits().await?;
    let entries = controller.entries().await;

    println!("Habits on {}", Local::now().format("%Y-%m-%d"));

    if entries.is_empty() {
        println!();
        println!("No habits yet. Run `habitctl add <title>` to get started.");
        return Ok(());
    }

    let (completed, pending): (Vec<_>, Vec<_>) =
        entries.iter().partition(|e| e.status.completed_today);

    println!();
    println!("To do:");
    if pending.is_empty() {
        println!("  All habits completed today.");
    }
    for entry in pending {
        print_entry(entry);
    }

    println!();
    println!("Done today:");
    if completed.is_empty() {
        println!("  Nothing completed yet.");
    }
    for entry in completed {
        print_entry(entry);
    }

    Ok(())
}

fn print_entry(entry: &HabitEntry) {
    let mark = if entry.status.completed_today { "x" } else { " " };
    println!(
        "  [{mark}] {:>3}  {}  ({} day streak, {} completions)",
        entry.habit.id,
        entry.habit.title,
        entry.status.current_streak,
        entry.status.total_completions
    );
    if let Some(description) = &entry.habit.description {
        println!("           {description}");
    }
}

pub async fn add(config: &Config, title: &str, description: Option<String>) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    let controller = HabitController::new(api);
    controller
        .save_habit(title, description.as_deref(), None, &mut TermNotifier)
        .await
}

pub async fn edit(
    config: &Config,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    if title.is_none() && description.is_none() {
        anyhow::bail!("Nothing to change; pass --title and/or --description");
    }

    // Fill whichever field wasn't given from the server's current record.
    let current = api.habit(id).await?;
    let title = title.unwrap_or(current.title);
    let description = description.or(current.description);

    let controller = HabitController::new(api);
    controller
        .save_habit(&title, description.as_deref(), Some(id), &mut TermNotifier)
        .await
}

pub async fn rm(config: &Config, id: i64, yes: bool) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    if !yes {
        let habit = api.habit(id).await?;
        let answer = prompt(&format!("Delete habit \"{}\"? [y/N] ", habit.title))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let controller = HabitController::new(api);
    controller.delete_habit(id, &mut TermNotifier).await
}

pub async fn toggle(config: &Config, id: i64) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    let controller = HabitController::new(api);
    controller.load_habits().await?;
    controller.toggle_completion(id, &mut TermNotifier).await?;

    if let Some(entry) = controller.find(id).await {
        println!(
            "  {}: {} day streak, {} completions",
            entry.habit.title, entry.status.current_streak, entry.status.total_completions
        );
    }
    Ok(())
}

pub async fn streak(config: &Config, id: i64) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    let habit = api.habit(id).await?;
    let streak = api.streak(id).await?;
    println!("{}: {streak} day streak", habit.title);
    Ok(())
}
