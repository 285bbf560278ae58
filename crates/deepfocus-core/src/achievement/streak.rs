//! Consecutive-day streaks.
//!
//! A streak is the run of calendar days with at least one focus record
//! that ends today, or yesterday when nothing has been recorded yet today.
//! Days are compared as calendar dates in the caller's time zone, so runs
//! spanning a daylight-saving change are counted correctly.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate, TimeZone};

use crate::record::FocusRecord;

/// Distinct calendar days in `tz` that contain a focus record.
pub fn focus_days<Tz: TimeZone>(records: &[FocusRecord], tz: &Tz) -> BTreeSet<NaiveDate> {
    records
        .iter()
        .filter(|r| r.is_focus())
        .map(|r| r.local_day(tz))
        .collect()
}

/// Length of the run of `days` ending at `today` or the day before.
///
/// Older runs that stopped before yesterday do not count. Days after
/// `today` are ignored.
pub fn streak_from_days(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let anchor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut count = 1;
    let mut current = anchor;
    while let Some(prev) = current.pred_opt() {
        if !days.contains(&prev) {
            break;
        }
        count += 1;
        current = prev;
    }
    count
}

/// Current streak with days bucketed in `tz`.
pub fn consecutive_days_in<Tz: TimeZone>(
    records: &[FocusRecord],
    today: NaiveDate,
    tz: &Tz,
) -> u32 {
    let days = focus_days(records, tz);
    if days.is_empty() {
        return 0;
    }
    streak_from_days(&days, today)
}

/// Current streak in the system's local time zone.
pub fn consecutive_days(records: &[FocusRecord]) -> u32 {
    consecutive_days_in(records, Local::now().date_naive(), &Local)
}
