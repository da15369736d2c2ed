// driftwatch-core/src/application/checker.rs

// Produces warnings for one task run: structural sanity checks first,
// then the user-authored rule conditions. Warnings are returned, never
// saved here; the analyze use case persists them in one batch.

use tracing::{error, info};

use crate::domain::dq::evaluator::ExpressionEvaluator;
use crate::domain::model::{ColumnType, Project, Rule, Task, TaskStats, Warning};
use crate::ports::store::TaskStore;

pub struct DataQualityChecker {
    evaluator: ExpressionEvaluator,
}

impl DataQualityChecker {
    pub fn new(evaluator: ExpressionEvaluator) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &ExpressionEvaluator {
        &self.evaluator
    }

    /// Structural checks that need no rules: empty loads and all-NULL
    /// columns. Already-analyzed tasks are left alone.
    pub fn apply_basic_checks(&self, task: &Task, stats: &[TaskStats]) -> Vec<Warning> {
        if task.analyzed || stats.is_empty() {
            return Vec::new();
        }

        let mut warnings = Vec::new();

        // One warning per task, however many columns report zero rows.
        // An absent total_count counts as zero here.
        if stats.iter().any(|s| s.total_count.unwrap_or(0) == 0) {
            warnings.push(Warning::new(task.id, "Number of rows is 0"));
        }

        for stat in stats {
            if stat.column_type == ColumnType::Object {
                continue;
            }
            let loaded = stat.total_count.unwrap_or(0);
            let non_null = stat.count.unwrap_or(0);
            if loaded > 0 && non_null == 0 {
                warnings.push(Warning::new(
                    task.id,
                    format!("All values of column [{}] are NULL", stat.column),
                ));
            }
        }

        warnings
    }

    /// Evaluates every matching (rule, condition, column) triple. A triple
    /// matches when `rule.table_name + "." + condition.column_name` equals
    /// the statistics column exactly. A failing evaluation is logged and
    /// skipped; it must not block the remaining conditions.
    pub async fn apply_data_quality_checks(
        &self,
        project: &Project,
        task: &Task,
        stats: &[TaskStats],
        rules: &[Rule],
        store: &dyn TaskStore,
    ) -> Vec<Warning> {
        if task.analyzed || stats.is_empty() {
            return Vec::new();
        }

        let mut warnings = Vec::new();
        for rule in rules {
            for condition in &rule.conditions {
                let column = format!("{}.{}", rule.table_name, condition.column_name);
                for stat in stats.iter().filter(|s| s.column == column) {
                    match self
                        .evaluator
                        .is_fulfilled(project, task, stat, condition, store)
                        .await
                    {
                        Ok(verdict) if verdict.fulfilled => {}
                        Ok(verdict) => {
                            info!(
                                condition = condition.id,
                                rule = rule.id,
                                column = %stat.column,
                                "Condition not fulfilled"
                            );
                            warnings.push(Warning::new(
                                task.id,
                                format!(
                                    "Condition [{}] of rule [{}] {} is not fulfilled. {}",
                                    condition.id, rule.id, condition.expression, verdict.message
                                ),
                            ));
                        }
                        Err(e) => {
                            error!(
                                condition = condition.id,
                                rule = rule.id,
                                column = %stat.column,
                                error = %e,
                                "Condition evaluation failed"
                            );
                        }
                    }
                }
            }
        }
        warnings
    }
}
