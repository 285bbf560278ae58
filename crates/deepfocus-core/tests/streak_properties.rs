//! Property tests for streak computation and achievement monotonicity.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use deepfocus_core::achievement::streak::consecutive_days_in;
use deepfocus_core::{AchievementEngine, FocusRecord, MemoryStore, RecordType};
use proptest::prelude::*;

fn tz() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
}

fn record(days_ago: i64, hour: u32, kind: RecordType) -> FocusRecord {
    let day = today() - Duration::days(days_ago);
    let date: DateTime<Utc> = tz()
        .from_local_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
        .unwrap()
        .with_timezone(&Utc);
    FocusRecord {
        id: days_ago * 24 + i64::from(hour),
        task_id: 1,
        task_name: "Default Task".into(),
        duration: 1500,
        date,
        kind,
    }
}

fn break_strategy() -> impl Strategy<Value = RecordType> {
    prop_oneof![Just(RecordType::ShortBreak), Just(RecordType::LongBreak)]
}

fn kind_strategy() -> impl Strategy<Value = RecordType> {
    prop_oneof![
        Just(RecordType::Focus),
        Just(RecordType::ShortBreak),
        Just(RecordType::LongBreak),
    ]
}

fn records_strategy() -> impl Strategy<Value = Vec<FocusRecord>> {
    prop::collection::vec((0i64..40, 0u32..24, kind_strategy()), 0..60)
        .prop_map(|v| v.into_iter().map(|(d, h, k)| record(d, h, k)).collect())
}

fn streak(records: &[FocusRecord]) -> u32 {
    consecutive_days_in(records, today(), &tz())
}

proptest! {
    #[test]
    fn breaks_alone_never_make_a_streak(
        entries in prop::collection::vec((0i64..40, 0u32..24, break_strategy()), 0..40)
    ) {
        let records: Vec<_> = entries.into_iter().map(|(d, h, k)| record(d, h, k)).collect();
        prop_assert_eq!(streak(&records), 0);
    }

    #[test]
    fn focus_today_means_at_least_one(mut records in records_strategy(), hour in 0u32..24) {
        records.push(record(0, hour, RecordType::Focus));
        prop_assert!(streak(&records) >= 1);
    }

    #[test]
    fn nothing_today_or_yesterday_means_zero(records in records_strategy()) {
        let old: Vec<_> = records
            .into_iter()
            .filter(|r| r.date.with_timezone(&tz()).date_naive() < today() - Duration::days(1))
            .collect();
        prop_assert_eq!(streak(&old), 0);
    }

    #[test]
    fn streak_never_exceeds_distinct_focus_days(records in records_strategy()) {
        let days: std::collections::HashSet<_> = records
            .iter()
            .filter(|r| r.kind == RecordType::Focus)
            .map(|r| r.date.with_timezone(&tz()).date_naive())
            .collect();
        prop_assert!(streak(&records) as usize <= days.len());
    }

    #[test]
    fn unlocks_are_monotonic_and_idempotent(
        snapshots in prop::collection::vec(records_strategy(), 1..6),
        offsets in prop::collection::vec(0i64..10, 6),
    ) {
        let kv = MemoryStore::new();
        let base = tz().from_local_datetime(&today().and_hms_opt(20, 0, 0).unwrap()).unwrap();
        let mut engine = AchievementEngine::new_at(&kv, &Vec::<FocusRecord>::new(), base);
        let mut previous = engine.achievements().to_vec();

        for (records, offset) in snapshots.iter().zip(offsets) {
            let at = base + Duration::days(offset);
            engine.refresh_at(records, at);
            for (before, after) in previous.iter().zip(engine.achievements()) {
                if before.unlocked {
                    prop_assert!(after.unlocked);
                    prop_assert_eq!(before.unlock_date, after.unlock_date);
                }
                prop_assert_eq!(after.unlocked, after.unlock_date.is_some());
            }

            let settled = engine.achievements().to_vec();
            engine.refresh_at(records, at);
            prop_assert_eq!(engine.achievements(), settled.as_slice());

            previous = settled;
        }
    }
}
