//! Focus and break session records.
//!
//! Records are append-only and stored as a JSON array under
//! [`RECORDS_KEY`]. Period statistics bucket records by calendar day in
//! the caller's time zone.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{next_id, KvStore};
use crate::task::Task;

/// Storage key holding the JSON-encoded record list.
pub const RECORDS_KEY: &str = "deepfocus_records";

/// Kind of session a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordType {
    Focus,
    ShortBreak,
    LongBreak,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Focus => "focus",
            RecordType::ShortBreak => "short-break",
            RecordType::LongBreak => "long-break",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(RecordType::Focus),
            "short-break" => Ok(RecordType::ShortBreak),
            "long-break" => Ok(RecordType::LongBreak),
            other => Err(ValidationError::InvalidValue {
                field: "type".into(),
                message: format!("unknown record type '{other}'"),
            }),
        }
    }
}

/// A completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRecord {
    pub id: i64,
    pub task_id: i64,
    pub task_name: String,
    /// Length in seconds.
    pub duration: u64,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: RecordType,
}

impl FocusRecord {
    pub fn is_focus(&self) -> bool {
        self.kind == RecordType::Focus
    }

    /// Calendar day of this record in `tz`.
    pub fn local_day<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }
}

/// Read access to a set of records.
pub trait RecordSource {
    fn all_records(&self) -> &[FocusRecord];

    /// Number of focus-type records.
    fn total_focus_sessions(&self) -> usize {
        self.all_records().iter().filter(|r| r.is_focus()).count()
    }
}

impl RecordSource for [FocusRecord] {
    fn all_records(&self) -> &[FocusRecord] {
        self
    }
}

impl RecordSource for Vec<FocusRecord> {
    fn all_records(&self) -> &[FocusRecord] {
        self
    }
}

/// Name and total focus time of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFocus {
    pub name: String,
    pub duration: u64,
}

/// Focus totals, in seconds, for the current day, week and month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSummary {
    pub today: u64,
    pub week: u64,
    pub month: u64,
    pub total_sessions: usize,
}

/// Persistent record list.
pub struct RecordStore<S: KvStore> {
    store: S,
    records: Vec<FocusRecord>,
}

impl<S: KvStore> RecordStore<S> {
    /// Restore saved records. Unreadable data is logged and dropped.
    pub fn load(store: S) -> Self {
        let records = match store.get(RECORDS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("failed to parse saved records: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read saved records: {e}");
                Vec::new()
            }
        };
        Self { store, records }
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.store.set(RECORDS_KEY, &json)?;
        Ok(())
    }

    /// Record a session that just finished.
    ///
    /// # Errors
    /// Returns an error if the list cannot be saved. The record is kept in
    /// memory regardless.
    pub fn add_record(
        &mut self,
        task: &Task,
        duration: u64,
        kind: RecordType,
    ) -> Result<FocusRecord> {
        self.add_record_at(task, duration, kind, Utc::now())
    }

    /// Record a session that finished at `date`.
    ///
    /// # Errors
    /// Returns an error if the list cannot be saved.
    pub fn add_record_at(
        &mut self,
        task: &Task,
        duration: u64,
        kind: RecordType,
        date: DateTime<Utc>,
    ) -> Result<FocusRecord> {
        let last = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        let record = FocusRecord {
            id: next_id(last, Utc::now()),
            task_id: task.id,
            task_name: task.name.clone(),
            duration,
            date,
            kind,
        };
        self.records.push(record.clone());
        self.save()?;
        Ok(record)
    }

    pub fn records(&self) -> &[FocusRecord] {
        &self.records
    }

    /// Records dated within `[start, end]`.
    pub fn records_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&FocusRecord> {
        self.records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect()
    }

    pub fn records_for_task(&self, task_id: i64) -> Vec<&FocusRecord> {
        self.records.iter().filter(|r| r.task_id == task_id).collect()
    }

    /// Sum of focus durations whose local day falls in `[from, until)`.
    fn focus_between<Tz: TimeZone>(&self, tz: &Tz, from: NaiveDate, until: NaiveDate) -> u64 {
        self.records
            .iter()
            .filter(|r| r.is_focus())
            .filter(|r| {
                let day = r.local_day(tz);
                day >= from && day < until
            })
            .map(|r| r.duration)
            .sum()
    }

    pub fn today_focus_duration_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u64 {
        let today = now.date_naive();
        self.focus_between(&now.timezone(), today, today + Duration::days(1))
    }

    /// Weeks start on Sunday.
    pub fn week_focus_duration_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u64 {
        let today = now.date_naive();
        let start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        self.focus_between(&now.timezone(), start, start + Duration::days(7))
    }

    pub fn month_focus_duration_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u64 {
        let today = now.date_naive();
        let start = today.with_day(1).unwrap_or(today);
        let next = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        }
        .unwrap_or(NaiveDate::MAX);
        self.focus_between(&now.timezone(), start, next)
    }

    pub fn today_focus_duration(&self) -> u64 {
        self.today_focus_duration_at(&Local::now())
    }

    pub fn week_focus_duration(&self) -> u64 {
        self.week_focus_duration_at(&Local::now())
    }

    pub fn month_focus_duration(&self) -> u64 {
        self.month_focus_duration_at(&Local::now())
    }

    pub fn summary_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> FocusSummary {
        FocusSummary {
            today: self.today_focus_duration_at(now),
            week: self.week_focus_duration_at(now),
            month: self.month_focus_duration_at(now),
            total_sessions: self.total_focus_sessions(),
        }
    }

    pub fn summary(&self) -> FocusSummary {
        self.summary_at(&Local::now())
    }

    /// Focus time per task id. The name is taken from the first record
    /// seen for the task.
    pub fn task_focus_durations(&self) -> BTreeMap<i64, TaskFocus> {
        let mut result: BTreeMap<i64, TaskFocus> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.is_focus()) {
            result
                .entry(record.task_id)
                .or_insert_with(|| TaskFocus {
                    name: record.task_name.clone(),
                    duration: 0,
                })
                .duration += record.duration;
        }
        result
    }
}

impl<S: KvStore> RecordSource for RecordStore<S> {
    fn all_records(&self) -> &[FocusRecord] {
        &self.records
    }
}
