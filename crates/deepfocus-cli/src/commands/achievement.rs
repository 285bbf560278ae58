//! Streak and achievement commands.

use clap::Subcommand;
use deepfocus_core::{AchievementEngine, AchievementKind, Config, RecordStore};

use super::open_database;

#[derive(Subcommand)]
pub enum AchievementAction {
    /// List achievements, unlocked first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the current consecutive-day streak
    Streak,
    /// Re-evaluate achievements against the recorded sessions
    Check,
    /// Unlock an achievement by ID
    Unlock {
        /// Achievement ID (e.g. "consecutive_3")
        id: String,
    },
}

pub fn run(action: AchievementAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let records = RecordStore::load(&db);
    let mut engine = AchievementEngine::new(&db, &records);

    match action {
        AchievementAction::List { json } => {
            let sorted = engine.sorted_achievements();
            if json {
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                for a in sorted {
                    let unit = match a.kind {
                        AchievementKind::Consecutive => "days",
                        AchievementKind::Total => "sessions",
                    };
                    let mark = if a.unlocked { "x" } else { " " };
                    print!(
                        "[{mark}] {:<16} {:>4}/{:<4} {:<8} {}",
                        a.name, a.progress, a.target, unit, a.id
                    );
                    match a.unlock_date {
                        Some(date) => println!(
                            "  unlocked {}",
                            date.with_timezone(&chrono::Local).format("%Y-%m-%d")
                        ),
                        None => println!(),
                    }
                }
            }
        }
        AchievementAction::Streak => {
            println!("{}", engine.consecutive_days());
        }
        AchievementAction::Check => {
            let unlocked = engine.refresh(&records);
            if unlocked.is_empty() {
                println!("No new achievements");
            }
            for a in unlocked {
                println!("Achievement unlocked: {} - {}", a.name, a.description);
            }
        }
        AchievementAction::Unlock { id } => {
            if engine.unlock(&id) {
                println!("ok");
            } else if engine.get(&id).is_some() {
                println!("already unlocked: {id}");
            } else {
                println!("unknown achievement: {id}");
            }
        }
    }
    Ok(())
}
