//! Session recording and statistics commands.

use clap::Subcommand;
use deepfocus_core::{AchievementEngine, Config, RecordStore, RecordType, TaskStore};

use super::{format_duration, open_database};

#[derive(Subcommand)]
pub enum RecordAction {
    /// Record a finished session
    Add {
        /// Task ID (default: the default task)
        #[arg(long)]
        task: Option<i64>,
        /// Session length in minutes (default: from config)
        #[arg(long)]
        minutes: Option<u32>,
        /// Session type: focus, short-break or long-break
        #[arg(long, default_value = "focus")]
        kind: RecordType,
    },
    /// List records
    List {
        /// Only records of this task
        #[arg(long)]
        task: Option<i64>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Focus time today, this week and this month
    Stats,
}

pub fn run(action: RecordAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let mut records = RecordStore::load(&db);

    match action {
        RecordAction::Add {
            task,
            minutes,
            kind,
        } => {
            let tasks = TaskStore::load(&db);
            let task = match task {
                Some(id) => tasks
                    .get(id)
                    .ok_or_else(|| format!("task not found: {id}"))?,
                None => tasks.default_task().ok_or("no tasks defined")?,
            };
            let duration = match minutes {
                Some(m) => u64::from(m) * 60,
                None => config.session.duration_secs(kind),
            };

            let mut engine = AchievementEngine::new(&db, &records);
            let record = records.add_record(task, duration, kind)?;
            tracing::debug!("recorded session {} for task {}", record.id, record.task_id);
            println!(
                "Recorded {} {} for {}",
                format_duration(record.duration),
                record.kind,
                record.task_name
            );

            for achievement in engine.refresh(&records) {
                println!(
                    "Achievement unlocked: {} - {}",
                    achievement.name, achievement.description
                );
            }
        }
        RecordAction::List { task, json } => {
            let selected: Vec<_> = match task {
                Some(id) => records.records_for_task(id),
                None => records.records().iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&selected)?);
            } else {
                for record in selected {
                    println!(
                        "{}  {:<11}  {:>7}  {}",
                        record.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                        record.kind,
                        format_duration(record.duration),
                        record.task_name
                    );
                }
            }
        }
        RecordAction::Stats => {
            let summary = records.summary();
            println!("Today:      {}", format_duration(summary.today));
            println!("This week:  {}", format_duration(summary.week));
            println!("This month: {}", format_duration(summary.month));
            println!("Sessions:   {}", summary.total_sessions);
            for focus in records.task_focus_durations().into_values() {
                println!("  {:<24} {}", focus.name, format_duration(focus.duration));
            }
        }
    }
    Ok(())
}
