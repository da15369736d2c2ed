// driftwatch-core/src/ports/store.rs

// This file defines what the engine needs from the surrounding tracker,
// without knowing how it is stored. The relational schema, the HTTP layer
// and the cron trigger all live on the other side of this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::model::{Task, TaskStats, Warning};
use crate::error::DriftwatchError;

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Most recent SUCCEEDED runs of (project, task name) with a nominal
    /// date strictly before `before`, newest first, at most `limit`.
    async fn last_succeeded_tasks(
        &self,
        project_id: i64,
        task_name: &str,
        before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Task>, DriftwatchError>;

    /// Statistics rows of one run.
    async fn stats_for(&self, task_id: i64) -> Result<Vec<TaskStats>, DriftwatchError>;

    /// Warnings already attached to one run.
    async fn warnings_for(&self, task_id: i64) -> Result<Vec<Warning>, DriftwatchError>;

    /// Append-only batch persist. No merge/update path exists.
    async fn save_warnings(&self, warnings: Vec<Warning>) -> Result<(), DriftwatchError>;

    /// Flag a run as analyzed so it is never checked twice.
    async fn mark_analyzed(&self, task_id: i64) -> Result<(), DriftwatchError>;
}
