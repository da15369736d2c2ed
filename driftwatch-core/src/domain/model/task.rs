// driftwatch-core/src/domain/model/task.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One execution of a named pipeline job.
///
/// The lifecycle (state transitions, synchronization with the workflow
/// system) lives outside this crate; the engine reads `state`,
/// `nominal_date`, `start_date` and the `analyzed` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub state: TaskState,
    pub start_date: DateTime<Utc>,
    /// Business date of the run (not the wall-clock start).
    pub nominal_date: DateTime<Utc>,
    /// Set by the caller once the quality checks ran. Checks are a no-op
    /// on a task already flagged.
    #[serde(default)]
    pub analyzed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Running,
    Scheduled,
    Failed,
    Canceled,
    Succeeded,
}

impl Task {
    pub fn is_failed(&self) -> bool {
        self.state == TaskState::Failed
    }

    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Succeeded
    }
}
