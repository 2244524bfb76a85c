//! Completion state machine: optimistic flip, then confirm or revert.
//!
//! The flip-then-settle logic is pure so it can be reasoned about (and
//! tested) without any I/O. The controller flips the visible state first,
//! runs the network calls, classifies what came back as a [`CallOutcome`],
//! and applies whatever [`resolve`] decides.

use crate::api::types::HabitStats;

/// Per-day status of one habit, merged from independent service calls.
///
/// Streak and total are best-effort: they may be locally estimated when a
/// stats fetch fails, and go stale until the next load cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitStatus {
    pub completed_today: bool,
    pub current_streak: u32,
    pub total_completions: u32,
}

/// Direction of an intended completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Complete,
    Uncomplete,
}

impl Toggle {
    /// The toggle implied by the current visible state.
    pub fn from_status(status: HabitStatus) -> Self {
        if status.completed_today {
            Toggle::Uncomplete
        } else {
            Toggle::Complete
        }
    }

    fn completes(self) -> bool {
        matches!(self, Toggle::Complete)
    }
}

/// How the primary toggle call (plus the stats re-fetch) settled.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// Primary call succeeded. `refreshed` holds the stats re-fetch result
    /// when that succeeded too; `None` falls back to a local estimate.
    Confirmed { refreshed: Option<HabitStats> },
    /// Primary call failed, but the service says the habit is already
    /// completed today. The user's intent is satisfied server-side, so the
    /// completed state is adopted instead of rolled back.
    AlreadyCompleted,
    /// Primary call failed outright.
    Failed,
}

/// The settled decision for a toggle attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Display this state (confirmed, estimated, or conflict-adopted).
    Adopt(HabitStatus),
    /// Revert the optimistic flip to this pre-call state.
    Revert(HabitStatus),
}

impl HabitStatus {
    /// The optimistic state shown while the network call is in flight.
    pub fn flipped(self, intent: Toggle) -> HabitStatus {
        HabitStatus {
            completed_today: intent.completes(),
            ..self
        }
    }

    /// Local approximation used when the stats re-fetch fails: bump the
    /// total by one and guess at the streak. Not authoritative; the next
    /// successful stats fetch overwrites it.
    fn estimated(self, intent: Toggle) -> HabitStatus {
        match intent {
            Toggle::Complete => HabitStatus {
                completed_today: true,
                current_streak: self.current_streak + 1,
                total_completions: self.total_completions + 1,
            },
            Toggle::Uncomplete => HabitStatus {
                completed_today: false,
                current_streak: 0,
                total_completions: self.total_completions.saturating_sub(1),
            },
        }
    }
}

/// Decides the final visible state for a settled toggle attempt.
///
/// `before` is the status prior to the optimistic flip.
pub fn resolve(before: HabitStatus, intent: Toggle, outcome: &CallOutcome) -> Resolution {
    match outcome {
        CallOutcome::Confirmed {
            refreshed: Some(stats),
        } => Resolution::Adopt(HabitStatus {
            completed_today: intent.completes(),
            current_streak: stats.current_streak,
            total_completions: stats.total_completions,
        }),
        CallOutcome::Confirmed { refreshed: None } => Resolution::Adopt(before.estimated(intent)),
        CallOutcome::AlreadyCompleted => Resolution::Adopt(HabitStatus {
            completed_today: true,
            ..before
        }),
        CallOutcome::Failed => Resolution::Revert(before),
    }
}
