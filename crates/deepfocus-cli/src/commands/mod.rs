pub mod achievement;
pub mod config;
pub mod record;
pub mod task;

use deepfocus_core::{Config, CoreError, Database};

/// Open the configured database, or the default one in the data directory.
pub fn open_database(config: &Config) -> Result<Database, CoreError> {
    match &config.storage.database {
        Some(path) => Database::open_at(path),
        None => Database::open(),
    }
}

/// Format seconds as "1h 05m" / "25m".
pub fn format_duration(secs: u64) -> String {
    let minutes = secs / 60;
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(1500), "25m");
        assert_eq!(format_duration(3900), "1h 05m");
    }
}
