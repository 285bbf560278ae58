//! Achievement state machine.
//!
//! The engine owns the unlock state of every achievement plus the last
//! computed streak. Both are derived from the record source on every
//! [`refresh`](AchievementEngine::refresh) and written back to the
//! key-value store after each mutation. Storage failures are logged and
//! never returned: the in-memory state stays authoritative and the next
//! successful write carries it forward.

use std::collections::HashSet;

use chrono::{DateTime, Local, TimeZone, Utc};

use super::{catalog, streak, Achievement, AchievementKind};
use crate::error::{CoreError, Result, ValidationError};
use crate::record::RecordSource;
use crate::storage::KvStore;

/// Storage key holding the JSON-encoded achievement list.
pub const ACHIEVEMENTS_KEY: &str = "deepfocus_achievements";

/// Storage key holding the last streak as a decimal string.
pub const CONSECUTIVE_DAYS_KEY: &str = "deepfocus_consecutive_days";

/// Derives streak and achievement state from focus records.
pub struct AchievementEngine<S: KvStore> {
    store: S,
    achievements: Vec<Achievement>,
    consecutive_days: u32,
    total_focus: u32,
}

impl<S: KvStore> AchievementEngine<S> {
    /// Restore saved state and bring it up to date with `records`.
    pub fn new<R: RecordSource + ?Sized>(store: S, records: &R) -> Self {
        Self::new_at(store, records, Local::now())
    }

    /// Like [`new`](Self::new), evaluating as of `now`.
    pub fn new_at<R, Tz>(store: S, records: &R, now: DateTime<Tz>) -> Self
    where
        R: RecordSource + ?Sized,
        Tz: TimeZone,
    {
        let mut engine = Self {
            store,
            achievements: catalog::seed(),
            consecutive_days: 0,
            total_focus: 0,
        };
        engine.load();
        engine.refresh_at(records, now);
        engine
    }

    /// Replace in-memory state with what the store holds.
    ///
    /// Missing or unreadable data falls back to the catalog and a zero
    /// streak.
    pub fn load(&mut self) {
        self.achievements = match self.read_achievements() {
            Ok(Some(saved)) => merge_with_catalog(saved),
            Ok(None) => catalog::seed(),
            Err(e) => {
                tracing::warn!("failed to load achievements, using defaults: {e}");
                catalog::seed()
            }
        };

        self.consecutive_days = match self.read_consecutive_days() {
            Ok(days) => days.unwrap_or(0),
            Err(e) => {
                tracing::warn!("failed to load consecutive days: {e}");
                0
            }
        };
    }

    fn read_achievements(&self) -> Result<Option<Vec<Achievement>>> {
        let Some(json) = self.store.get(ACHIEVEMENTS_KEY)? else {
            return Ok(None);
        };
        let saved: Vec<Achievement> = serde_json::from_str(&json)?;
        Ok(Some(saved))
    }

    fn read_consecutive_days(&self) -> Result<Option<u32>> {
        let Some(raw) = self.store.get(CONSECUTIVE_DAYS_KEY)? else {
            return Ok(None);
        };
        raw.trim().parse::<u32>().map(Some).map_err(|e| {
            CoreError::from(ValidationError::InvalidValue {
                field: CONSECUTIVE_DAYS_KEY.into(),
                message: format!("'{raw}': {e}"),
            })
        })
    }

    /// Write achievements and streak to the store.
    pub fn save(&self) {
        if let Err(e) = self.write() {
            tracing::warn!("failed to save achievements: {e}");
        }
    }

    fn write(&self) -> Result<()> {
        let json = serde_json::to_string(&self.achievements)?;
        self.store.set(ACHIEVEMENTS_KEY, &json)?;
        self.store
            .set(CONSECUTIVE_DAYS_KEY, &self.consecutive_days.to_string())?;
        Ok(())
    }

    /// Recompute the streak from `records` in local time.
    pub fn calculate_consecutive_days<R: RecordSource + ?Sized>(&mut self, records: &R) -> u32 {
        self.calculate_consecutive_days_at(records, &Local::now())
    }

    /// Recompute the streak with `now`'s date and time zone as "today".
    pub fn calculate_consecutive_days_at<R, Tz>(&mut self, records: &R, now: &DateTime<Tz>) -> u32
    where
        R: RecordSource + ?Sized,
        Tz: TimeZone,
    {
        self.consecutive_days =
            streak::consecutive_days_in(records.all_records(), now.date_naive(), &now.timezone());
        tracing::debug!("consecutive focus days: {}", self.consecutive_days);
        self.consecutive_days
    }

    /// Update progress of every achievement and unlock those whose target
    /// is reached, then save.
    ///
    /// Returns the achievements unlocked by this pass.
    pub fn check_achievements(&mut self, total_focus_sessions: usize) -> Vec<Achievement> {
        self.check_achievements_at(total_focus_sessions, Utc::now())
    }

    pub fn check_achievements_at(
        &mut self,
        total_focus_sessions: usize,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        self.total_focus = u32::try_from(total_focus_sessions).unwrap_or(u32::MAX);

        let mut newly_unlocked = Vec::new();
        for achievement in &mut self.achievements {
            let progress = match achievement.kind {
                AchievementKind::Consecutive => self.consecutive_days,
                AchievementKind::Total => self.total_focus,
            };
            if achievement.record_progress(progress, now) {
                tracing::info!("achievement unlocked: {} ({})", achievement.name, achievement.id);
                newly_unlocked.push(achievement.clone());
            }
        }

        self.save();
        newly_unlocked
    }

    /// Recompute the streak and run a full evaluation pass.
    ///
    /// Call after the record source changes.
    pub fn refresh<R: RecordSource + ?Sized>(&mut self, records: &R) -> Vec<Achievement> {
        self.refresh_at(records, Local::now())
    }

    pub fn refresh_at<R, Tz>(&mut self, records: &R, now: DateTime<Tz>) -> Vec<Achievement>
    where
        R: RecordSource + ?Sized,
        Tz: TimeZone,
    {
        self.calculate_consecutive_days_at(records, &now);
        self.check_achievements_at(records.total_focus_sessions(), now.with_timezone(&Utc))
    }

    /// Unlock an achievement by id regardless of progress.
    ///
    /// Unknown and already unlocked ids are ignored. Returns whether
    /// anything changed.
    pub fn unlock(&mut self, id: &str) -> bool {
        self.unlock_at(id, Utc::now())
    }

    pub fn unlock_at(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        let Some(achievement) = self.achievements.iter_mut().find(|a| a.id == id) else {
            tracing::debug!("ignoring unlock of unknown achievement {id}");
            return false;
        };
        if !achievement.unlock(now) {
            return false;
        }
        tracing::info!("achievement unlocked manually: {} ({})", achievement.name, achievement.id);
        self.save();
        true
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn consecutive_days(&self) -> u32 {
        self.consecutive_days
    }

    /// Focus session count seen by the last evaluation pass.
    pub fn total_focus_count(&self) -> u32 {
        self.total_focus
    }

    pub fn unlocked_achievements(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.unlocked).collect()
    }

    pub fn locked_achievements(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| !a.unlocked).collect()
    }

    /// Unlocked first, then streak achievements before totals, then by
    /// target.
    pub fn sorted_achievements(&self) -> Vec<&Achievement> {
        let mut sorted: Vec<&Achievement> = self.achievements.iter().collect();
        sorted.sort_by_key(|a| {
            (
                !a.unlocked,
                a.kind != AchievementKind::Consecutive,
                a.target,
            )
        });
        sorted
    }

}

/// Reconcile a restored list with the catalog.
///
/// Saved entries are kept in saved order. Definitions the saved list does
/// not know yet are appended locked. `unlocked` is taken from the presence
/// of `unlock_date`: an entry without a date is still locked.
fn merge_with_catalog(mut saved: Vec<Achievement>) -> Vec<Achievement> {
    for achievement in &mut saved {
        achievement.unlocked = achievement.unlock_date.is_some();
    }

    let known: HashSet<String> = saved.iter().map(|a| a.id.clone()).collect();
    saved.extend(
        catalog::DEFINITIONS
            .iter()
            .filter(|d| !known.contains(d.id))
            .map(catalog::AchievementDef::to_achievement),
    );
    saved
}
