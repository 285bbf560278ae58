//! Named tasks that focus sessions are recorded against.
//!
//! The task list is stored as a JSON array under [`TASKS_KEY`]. A fresh
//! install (or an unreadable list) is seeded with [`default_tasks`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{next_id, KvStore};

/// Storage key holding the JSON-encoded task list.
pub const TASKS_KEY: &str = "deepfocus_tasks";

/// Name of the task used when a session is recorded without one.
pub const DEFAULT_TASK_NAME: &str = "Default Task";

/// A task that focus sessions can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    fn new(id: i64, name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Tasks present on first run.
pub fn default_tasks(now: DateTime<Utc>) -> Vec<Task> {
    [DEFAULT_TASK_NAME, "Learn Programming", "Workout", "Reading"]
        .iter()
        .zip(1..)
        .map(|(name, id)| Task::new(id, name, now))
        .collect()
}

fn validate_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".into(),
            message: "task name must not be empty".into(),
        });
    }
    Ok(trimmed)
}

/// Persistent task list.
pub struct TaskStore<S: KvStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: KvStore> TaskStore<S> {
    /// Restore the task list, seeding and saving the defaults when nothing
    /// usable is stored.
    pub fn load(store: S) -> Self {
        let saved = match store.get(TASKS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => Some(tasks),
                Err(e) => {
                    tracing::warn!("failed to parse saved tasks, using defaults: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read saved tasks, using defaults: {e}");
                None
            }
        };

        match saved {
            Some(tasks) => Self { store, tasks },
            None => {
                let this = Self {
                    store,
                    tasks: default_tasks(Utc::now()),
                };
                if let Err(e) = this.save() {
                    tracing::warn!("failed to save default tasks: {e}");
                }
                this
            }
        }
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.tasks)?;
        self.store.set(TASKS_KEY, &json)?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The task named [`DEFAULT_TASK_NAME`], else the first task.
    pub fn default_task(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.name == DEFAULT_TASK_NAME)
            .or_else(|| self.tasks.first())
    }

    /// Create a task and persist the list.
    ///
    /// # Errors
    /// Returns an error if the name is blank or the list cannot be saved.
    /// On a save failure the task is still kept in memory.
    pub fn add_task(&mut self, name: &str) -> Result<Task> {
        let name = validate_name(name)?;
        let now = Utc::now();
        let last = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let task = Task::new(next_id(last, now), name, now);
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Rename a task. Returns `false` if no task has this id.
    ///
    /// # Errors
    /// Returns an error if the name is blank or the list cannot be saved.
    pub fn update_task(&mut self, id: i64, name: &str) -> Result<bool> {
        let name = validate_name(name)?;
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.name = name.to_string();
        task.updated_at = Utc::now();
        self.save()?;
        Ok(true)
    }

    /// Delete a task. Returns `false` if no task has this id.
    ///
    /// Records already attributed to the task keep their copy of its name.
    ///
    /// # Errors
    /// Returns an error if the list cannot be saved.
    pub fn delete_task(&mut self, id: i64) -> Result<bool> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        self.tasks.remove(index);
        self.save()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;

    #[test]
    fn first_load_seeds_and_saves_defaults() {
        let kv = MemoryStore::new();
        let store = TaskStore::load(&kv);
        let names: Vec<_> = store.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![DEFAULT_TASK_NAME, "Learn Programming", "Workout", "Reading"]
        );
        assert_eq!(store.tasks()[0].id, 1);
        assert!(kv.get(TASKS_KEY).unwrap().is_some());
    }

    #[test]
    fn corrupted_list_falls_back_to_defaults() {
        let kv = MemoryStore::new();
        kv.set(TASKS_KEY, "{not json").unwrap();
        let store = TaskStore::load(&kv);
        assert_eq!(store.tasks().len(), 4);
    }

    #[test]
    fn add_rename_delete() {
        let kv = MemoryStore::new();
        let mut store = TaskStore::load(&kv);

        let task = store.add_task("  Write thesis ").unwrap();
        assert_eq!(task.name, "Write thesis");
        assert!(task.id > 4);

        assert!(store.update_task(task.id, "Write chapter 1").unwrap());
        assert_eq!(store.get(task.id).unwrap().name, "Write chapter 1");

        assert!(store.delete_task(task.id).unwrap());
        assert!(store.get(task.id).is_none());
        assert!(!store.delete_task(task.id).unwrap());
        assert!(!store.update_task(task.id, "gone").unwrap());
    }

    #[test]
    fn blank_name_is_rejected() {
        let kv = MemoryStore::new();
        let mut store = TaskStore::load(&kv);
        let err = store.add_task("   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store.tasks().len(), 4);
    }

    #[test]
    fn tasks_survive_reload() {
        let kv = MemoryStore::new();
        let id = {
            let mut store = TaskStore::load(&kv);
            store.add_task("Piano").unwrap().id
        };
        let store = TaskStore::load(&kv);
        assert_eq!(store.get(id).unwrap().name, "Piano");
    }

    #[test]
    fn default_task_falls_back_to_first() {
        let kv = MemoryStore::new();
        let mut store = TaskStore::load(&kv);
        assert_eq!(store.default_task().unwrap().id, 1);
        store.delete_task(1).unwrap();
        assert_eq!(store.default_task().unwrap().name, "Learn Programming");
    }
}
