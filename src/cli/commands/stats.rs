//! Detailed statistics view.

use anyhow::Result;
use futures_util::future::join_all;
use tracing::warn;

use super::{require_session, services};
use crate::config::Config;

pub async fn show(config: &Config) -> Result<()> {
    let (session, api, _) = services(config)?;
    require_session(&session)?;

    let habits = api.habits().await?;
    if habits.is_empty() {
        println!("No statistics yet. Start tracking habits to see progress.");
        return Ok(());
    }

    // One stats fetch per habit, concurrently. A habit whose fetch fails
    // still gets a row.
    let stats = join_all(habits.iter().map(|h| api.stats(h.id))).await;

    for (habit, stats) in habits.iter().zip(stats) {
        println!("{}", habit.title);
        match stats {
            Ok(stats) => {
                println!("  current streak   {:>5}", stats.current_streak);
                println!("  longest streak   {:>5}", stats.longest_streak);
                println!("  total done       {:>5}", stats.total_completions);
                println!("  30-day rate      {:>4}%", stats.completion_rate_last_30_days);
            }
            Err(err) => {
                warn!(habit = habit.id, "stats fetch failed: {err}");
                println!("  no data yet");
            }
        }
        println!();
    }
    Ok(())
}
