// driftwatch-core/src/application/analyze.rs

use tracing::{info, instrument};

use crate::application::checker::DataQualityChecker;
use crate::domain::model::{Project, Rule, Task, Warning};
use crate::error::DriftwatchError;
use crate::ports::store::TaskStore;

/// Runs the full analysis for one task run: basic checks, then the rule
/// conditions. Warnings are saved in one batch and the task is marked
/// analyzed even when it produced none, so a run is never analyzed twice.
/// Failed and canceled runs are marked without being checked; their
/// statistics are not trustworthy.
#[instrument(skip(checker, project, task, rules, store), fields(task = task.id))]
pub async fn analyze_task(
    checker: &DataQualityChecker,
    project: &Project,
    task: &Task,
    rules: &[Rule],
    store: &dyn TaskStore,
) -> Result<Vec<Warning>, DriftwatchError> {
    if task.analyzed {
        return Ok(Vec::new());
    }

    let mut warnings = Vec::new();
    if task.is_failed() {
        info!(state = ?task.state, "Skipping checks for failed run");
    } else {
        let stats = store.stats_for(task.id).await?;
        warnings.extend(checker.apply_basic_checks(task, &stats));
        warnings.extend(
            checker
                .apply_data_quality_checks(project, task, &stats, rules, store)
                .await,
        );
    }

    if !warnings.is_empty() {
        store.save_warnings(warnings.clone()).await?;
    }
    store.mark_analyzed(task.id).await?;

    info!(warnings = warnings.len(), "Task analyzed");
    Ok(warnings)
}
