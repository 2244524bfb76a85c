//! Habit list state and the completion interaction flow.
//!
//! The controller owns the in-memory habit collection and exposes plain
//! callable operations; presentation layers bind them however they like
//! and receive user-visible outcomes through the [`Notifier`] seam.

pub mod status;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::api::types::{Habit, HabitPayload};
pub use status::{HabitStatus, Toggle};
use status::{CallOutcome, Resolution};

/// Substring the service uses to signal a completion conflict. The server
/// contract exposes no structured error code, so this string match is the
/// documented fallback.
const ALREADY_COMPLETED: &str = "Already completed";

/// Terminal notification channel for user-visible outcomes.
pub trait Notifier {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// A habit joined with its merged per-day status.
#[derive(Debug, Clone)]
pub struct HabitEntry {
    pub habit: Habit,
    pub status: HabitStatus,
    /// Guards against stale confirmations: bumped by every toggle and
    /// reload, so a slow response for an old attempt is discarded instead
    /// of clobbering newer state.
    seq: u64,
}

/// Owns the habit collection and drives the interaction flow.
///
/// Methods take `&self`; the collection sits behind a mutex that is never
/// held across a network call, so a UI may overlap operations (a toggle
/// racing a reload) without them interleaving mid-mutation.
pub struct HabitController {
    api: ApiClient,
    entries: Arc<Mutex<Vec<HabitEntry>>>,
    next_seq: AtomicU64,
}

impl HabitController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            entries: Arc::new(Mutex::new(Vec::new())),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Snapshot of the current collection, in server list order.
    pub async fn entries(&self) -> Vec<HabitEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn find(&self, habit_id: i64) -> Option<HabitEntry> {
        self.entries
            .lock()
            .await
            .iter()
            .find(|e| e.habit.id == habit_id)
            .cloned()
    }

    /// Rebuilds the whole collection from the service.
    ///
    /// Fetches the habit list, then each habit's completed-today flag and
    /// stats concurrently across habits. The merge runs only after every
    /// sub-fetch settles and follows the server list order. The previous
    /// collection is replaced wholesale; there is no incremental patching.
    pub async fn load_habits(&self) -> Result<()> {
        let habits = self.api.habits().await?;

        let statuses = join_all(habits.iter().map(|h| self.fetch_status(h.id))).await;

        let mut fresh = Vec::with_capacity(habits.len());
        for (habit, status) in habits.into_iter().zip(statuses) {
            fresh.push(HabitEntry {
                habit,
                status,
                seq: self.bump_seq(),
            });
        }

        *self.entries.lock().await = fresh;
        Ok(())
    }

    /// Fetches both status pieces for one habit, defaulting each piece
    /// independently on failure. One habit's bad day must not abort the
    /// whole load.
    async fn fetch_status(&self, habit_id: i64) -> HabitStatus {
        let (completed, stats) = tokio::join!(
            self.api.completed_today(habit_id),
            self.api.stats(habit_id)
        );

        let completed_today = match completed {
            Ok(done) => done,
            Err(err) => {
                warn!(habit = habit_id, "completed-today fetch failed: {err}");
                false
            }
        };

        let (current_streak, total_completions) = match stats {
            Ok(stats) => (stats.current_streak, stats.total_completions),
            Err(err) => {
                warn!(habit = habit_id, "stats fetch failed: {err}");
                (0, 0)
            }
        };

        HabitStatus {
            completed_today,
            current_streak,
            total_completions,
        }
    }

    /// Toggles today's completion for a habit, optimistically.
    ///
    /// The visible flag flips before the network call; the settled outcome
    /// either confirms it (adopting server stats, or a local estimate when
    /// the stats re-fetch fails), soft-succeeds on an "Already completed"
    /// conflict, or reverts the flip. A success/error notification fires on
    /// every path.
    pub async fn toggle_completion(&self, habit_id: i64, notify: &mut dyn Notifier) -> Result<()> {
        let (before, intent, seq) = {
            let mut entries = self.entries.lock().await;
            let Some(entry) = entries.iter_mut().find(|e| e.habit.id == habit_id) else {
                anyhow::bail!("No habit with id {habit_id}");
            };
            let before = entry.status;
            let intent = Toggle::from_status(before);
            let seq = self.bump_seq();
            entry.seq = seq;
            entry.status = before.flipped(intent);
            (before, intent, seq)
        };

        let primary = match intent {
            Toggle::Complete => self.api.complete(habit_id).await,
            Toggle::Uncomplete => self.api.uncomplete(habit_id).await,
        };

        let outcome = match primary {
            Ok(()) => {
                let refreshed = match self.api.stats(habit_id).await {
                    Ok(stats) => Some(stats),
                    Err(err) => {
                        warn!(habit = habit_id, "stats re-fetch failed, estimating: {err}");
                        None
                    }
                };
                CallOutcome::Confirmed { refreshed }
            }
            Err(err) if err.message.contains(ALREADY_COMPLETED) => CallOutcome::AlreadyCompleted,
            Err(err) => {
                warn!(habit = habit_id, "toggle failed: {err}");
                CallOutcome::Failed
            }
        };

        // The notification reflects how the attempt settled, whether or not
        // its state still applies below.
        let resolution = status::resolve(before, intent, &outcome);
        match &resolution {
            Resolution::Adopt(_) => notify.success(match intent {
                Toggle::Complete => "Habit completed",
                Toggle::Uncomplete => "Habit unmarked",
            }),
            Resolution::Revert(_) => notify.error(match intent {
                Toggle::Complete => "Failed to update habit",
                Toggle::Uncomplete => "Failed to unmark habit",
            }),
        }

        let mut entries = self.entries.lock().await;
        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.habit.id == habit_id && e.seq == seq)
        else {
            // A reload or newer toggle superseded this attempt while it was
            // in flight; its result no longer describes anything current.
            debug!(habit = habit_id, "discarding stale toggle result");
            return Ok(());
        };

        match resolution {
            Resolution::Adopt(new_status) => entry.status = new_status,
            Resolution::Revert(prior) => entry.status = prior,
        }

        Ok(())
    }

    /// Creates or updates a habit, then reloads the whole list so the
    /// displayed collection matches server state.
    ///
    /// The title is validated before any network call.
    pub async fn save_habit(
        &self,
        title: &str,
        description: Option<&str>,
        editing: Option<i64>,
        notify: &mut dyn Notifier,
    ) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            anyhow::bail!("Habit title cannot be empty");
        }

        let payload = HabitPayload {
            title: title.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
        };

        let result = match editing {
            Some(id) => self.api.update_habit(id, &payload).await.map(|_| ()),
            None => self.api.create_habit(&payload).await.map(|_| ()),
        };

        if let Err(err) = result {
            notify.error("Failed to save habit");
            return Err(err.into());
        }

        notify.success(if editing.is_some() {
            "Habit updated"
        } else {
            "Habit created"
        });
        self.load_habits().await
    }

    /// Deletes a habit and reloads the list. Confirmation is the caller's
    /// concern.
    pub async fn delete_habit(&self, habit_id: i64, notify: &mut dyn Notifier) -> Result<()> {
        if let Err(err) = self.api.delete_habit(habit_id).await {
            notify.error("Failed to delete habit");
            return Err(err.into());
        }

        notify.success("Habit deleted");
        self.load_habits().await
    }

    fn bump_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}
