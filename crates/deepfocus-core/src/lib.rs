//! # DeepFocus Core Library
//!
//! This library provides the state layer of the DeepFocus Pomodoro tracker:
//! tasks, recorded focus sessions, consecutive-day streaks and achievements.
//! The CLI binary and any GUI shell are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Storage**: every store persists one JSON value per key through the
//!   [`KvStore`] trait; [`Database`] backs it with SQLite, [`MemoryStore`]
//!   keeps it in memory. Application settings live in a TOML [`Config`].
//! - **Tasks and records**: [`TaskStore`] and [`RecordStore`] hold the raw
//!   data sessions are recorded against.
//! - **Achievements**: [`AchievementEngine`] derives the current streak and
//!   unlock state from any [`RecordSource`]. It is pull-based: call
//!   [`AchievementEngine::refresh`] after adding records.

pub mod achievement;
pub mod error;
pub mod record;
pub mod storage;
pub mod task;

pub use achievement::{Achievement, AchievementEngine, AchievementKind};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use record::{FocusRecord, FocusSummary, RecordSource, RecordStore, RecordType};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use task::{Task, TaskStore};
