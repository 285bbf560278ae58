//! Task management commands for CLI.

use clap::Subcommand;
use deepfocus_core::{Config, TaskStore};

use super::open_database;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new task
    Add {
        /// Task name
        name: String,
    },
    /// Rename a task
    Rename {
        /// Task ID
        id: i64,
        /// New name
        name: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config)?;
    let mut tasks = TaskStore::load(&db);

    match action {
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tasks.tasks())?);
            } else {
                for task in tasks.tasks() {
                    println!("{:>14}  {}", task.id, task.name);
                }
            }
        }
        TaskAction::Add { name } => {
            let task = tasks.add_task(&name)?;
            println!("Task created: {} ({})", task.name, task.id);
        }
        TaskAction::Rename { id, name } => {
            if !tasks.update_task(id, &name)? {
                return Err(format!("task not found: {id}").into());
            }
            println!("ok");
        }
        TaskAction::Delete { id } => {
            if !tasks.delete_task(id)? {
                return Err(format!("task not found: {id}").into());
            }
            println!("ok");
        }
    }
    Ok(())
}
