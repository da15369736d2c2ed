// driftwatch-core/src/infrastructure/memory.rs

// In-memory TaskStore adapter. Backs the CLI snapshot mode and the test
// suites; the production store lives in the surrounding tracker.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::model::{Task, TaskState, TaskStats, Warning};
use crate::error::DriftwatchError;
use crate::ports::store::TaskStore;

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    stats: Vec<TaskStats>,
    warnings: Vec<Warning>,
    next_task_id: i64,
    next_stats_id: i64,
    next_warning_id: i64,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test: take the data as-is.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts a task, assigning its id. Returns the stored copy.
    pub async fn insert_task(&self, mut task: Task) -> Task {
        let mut inner = self.lock();
        inner.next_task_id += 1;
        task.id = inner.next_task_id;
        inner.tasks.push(task.clone());
        task
    }

    /// Inserts a statistics row, assigning its id. Returns the stored copy.
    pub async fn insert_stats(&self, mut stats: TaskStats) -> TaskStats {
        let mut inner = self.lock();
        inner.next_stats_id += 1;
        stats.id = inner.next_stats_id;
        inner.stats.push(stats.clone());
        stats
    }

    pub fn all_warnings(&self) -> Vec<Warning> {
        self.lock().warnings.clone()
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn last_succeeded_tasks(
        &self,
        project_id: i64,
        task_name: &str,
        before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Task>, DriftwatchError> {
        let inner = self.lock();
        let mut matches: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| {
                t.project_id == project_id
                    && t.name == task_name
                    && t.state == TaskState::Succeeded
                    && t.nominal_date < before
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.nominal_date.cmp(&a.nominal_date));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn stats_for(&self, task_id: i64) -> Result<Vec<TaskStats>, DriftwatchError> {
        Ok(self
            .lock()
            .stats
            .iter()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn warnings_for(&self, task_id: i64) -> Result<Vec<Warning>, DriftwatchError> {
        Ok(self
            .lock()
            .warnings
            .iter()
            .filter(|w| w.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn save_warnings(&self, warnings: Vec<Warning>) -> Result<(), DriftwatchError> {
        let mut inner = self.lock();
        for mut warning in warnings {
            inner.next_warning_id += 1;
            warning.id = inner.next_warning_id;
            inner.warnings.push(warning);
        }
        Ok(())
    }

    async fn mark_analyzed(&self, task_id: i64) -> Result<(), DriftwatchError> {
        let mut inner = self.lock();
        match inner.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.analyzed = true;
                Ok(())
            }
            None => Err(DriftwatchError::StoreError(format!(
                "unknown task id {}",
                task_id
            ))),
        }
    }
}
