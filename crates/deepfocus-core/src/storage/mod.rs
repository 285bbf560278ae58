mod config;
pub mod database;
pub mod kv;

pub use config::{Config, LoggingConfig, SessionConfig, StorageConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/deepfocus[-dev]/` based on DEEPFOCUS_ENV.
///
/// Set DEEPFOCUS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEEPFOCUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deepfocus-dev")
    } else {
        base_dir.join("deepfocus")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Next millisecond-timestamp id, bumped past `last` so ids stay unique
/// when several entries are created within the same millisecond.
pub(crate) fn next_id(last: i64, now: chrono::DateTime<chrono::Utc>) -> i64 {
    now.timestamp_millis().max(last.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn next_id_uses_timestamp() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(next_id(0, now), now.timestamp_millis());
    }

    #[test]
    fn next_id_bumps_on_collision() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let first = next_id(0, now);
        assert_eq!(next_id(first, now), first + 1);
    }
}
