//! Streak tracking and achievements.
//!
//! Two families of achievements exist: *consecutive* ones track the
//! current run of calendar days with at least one focus session, *total*
//! ones track the number of focus sessions ever recorded. The
//! [`AchievementEngine`] derives both from a [`RecordSource`] and persists
//! unlock state through a [`KvStore`].
//!
//! [`RecordSource`]: crate::record::RecordSource
//! [`KvStore`]: crate::storage::KvStore

pub mod catalog;
mod engine;
pub mod streak;

pub use catalog::AchievementDef;
pub use engine::{AchievementEngine, ACHIEVEMENTS_KEY, CONSECUTIVE_DAYS_KEY};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What an achievement's progress measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    /// Current streak of consecutive focus days.
    Consecutive,
    /// Number of focus sessions ever recorded.
    Total,
}

/// Unlock state of one achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: u32,
    pub target: u32,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
}

impl Achievement {
    /// Update progress and unlock if the target is reached.
    ///
    /// Returns `true` only on the pass that unlocks it.
    pub fn record_progress(&mut self, progress: u32, now: DateTime<Utc>) -> bool {
        self.progress = progress;
        self.progress >= self.target && self.unlock(now)
    }

    /// Mark as unlocked at `now`. Returns `false` if it already was.
    pub fn unlock(&mut self, now: DateTime<Utc>) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.unlock_date = Some(now);
        true
    }

    /// Sessions or days still missing before the unlock.
    pub fn remaining(&self) -> u32 {
        self.target.saturating_sub(self.progress)
    }
}
