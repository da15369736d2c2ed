// driftwatch-core/src/infrastructure/config/snapshot.rs

// A snapshot file is a self-contained fixture: one project, its rules and
// a run history with per-column statistics. The `check` command hydrates
// it into the in-memory store and replays the analysis offline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::model::{Project, Rule, Task, TaskState, TaskStats};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::memory::InMemoryStore;

use super::rules::RuleConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub project: ProjectConfig,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub name: String,
    #[serde(default = "default_state")]
    pub state: TaskState,
    pub start_date: DateTime<Utc>,
    pub nominal_date: DateTime<Utc>,
    #[serde(default)]
    pub analyzed: bool,
    #[serde(default)]
    pub stats: Vec<TaskStats>,
}

fn default_state() -> TaskState {
    TaskState::Succeeded
}

#[instrument(skip(path))]
pub fn load_snapshot(path: &Path) -> Result<SnapshotFile, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(format!("{:?}", path)));
    }
    let content = fs::read_to_string(path)?;
    let file: SnapshotFile = serde_yaml::from_str(&content)?;
    info!(
        path = ?path,
        rules = file.rules.len(),
        tasks = file.tasks.len(),
        "Snapshot loaded"
    );
    Ok(file)
}

impl SnapshotFile {
    /// Loads the snapshot into `store` and returns the project, its
    /// materialized rules and the stored tasks in file order.
    pub async fn hydrate(
        self,
        store: &InMemoryStore,
    ) -> Result<(Project, Vec<Rule>, Vec<Task>), InfrastructureError> {
        let project = Project {
            id: 1,
            name: self.project.name,
        };

        let rules = super::rules::RulesFile { rules: self.rules }.into_rules(project.id)?;

        let mut tasks = Vec::with_capacity(self.tasks.len());
        for snapshot in self.tasks {
            let task = store
                .insert_task(Task {
                    id: 0,
                    project_id: project.id,
                    name: snapshot.name,
                    state: snapshot.state,
                    start_date: snapshot.start_date,
                    nominal_date: snapshot.nominal_date,
                    analyzed: snapshot.analyzed,
                })
                .await;
            for mut stats in snapshot.stats {
                stats.task_id = task.id;
                store.insert_stats(stats).await;
            }
            tasks.push(task);
        }

        Ok((project, rules, tasks))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ports::store::TaskStore;

    const SAMPLE: &str = r#"
project:
  name: TestProject
rules:
  - table_name: stg.test_task
    task_name: TestTask
    conditions:
      - column_name: cnt
        metric: count
        expression: is_above(3000)
tasks:
  - name: TestTask
    start_date: 2020-07-01T08:00:00Z
    nominal_date: 2020-07-01T08:00:00Z
    stats:
      - column: stg.test_task.cnt
        count: 4000
  - name: TestTask
    start_date: 2020-07-02T08:00:00Z
    nominal_date: 2020-07-02T08:00:00Z
    stats:
      - column: stg.test_task.cnt
        count: 10
"#;

    #[tokio::test]
    async fn test_hydrate_populates_store() {
        let file: SnapshotFile = serde_yaml::from_str(SAMPLE).unwrap();
        let store = InMemoryStore::new();
        let (project, rules, tasks) = file.hydrate(&store).await.unwrap();

        assert_eq!(project.name, "TestProject");
        assert_eq!(rules.len(), 1);
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.id > 0));

        let stats = store.stats_for(tasks[1].id).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].task_id, tasks[1].id);
        assert_eq!(stats[0].count, Some(10));
    }

    #[test]
    fn test_state_defaults_to_succeeded() {
        let file: SnapshotFile = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(file.tasks[0].state, TaskState::Succeeded);
    }
}
