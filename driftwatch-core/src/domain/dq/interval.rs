// driftwatch-core/src/domain/dq/interval.rs

// confidence_interval_sigma: tests the current metric value (or its first
// difference in delta mode) against [center - k*sigma, center + k*sigma]
// computed over a sliding historical window.
//
// The window must never contain a run that was already flagged: a warned
// anomaly ingested into the baseline would widen the interval and mask
// the next one.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::dq::descriptive::DescriptiveStats;
use crate::domain::dq::function::{
    ArgType, ArgValue, ArgumentSpec, CheckFunction, EvalContext, FunctionDescriptor, Verdict,
};
use crate::domain::error::DomainError;
use crate::error::DriftwatchError;

pub struct ConfidenceIntervalSigma {
    descriptor: FunctionDescriptor,
}

impl ConfidenceIntervalSigma {
    pub fn new() -> Self {
        Self {
            descriptor: FunctionDescriptor {
                name: "confidence_interval_sigma",
                description: "Evaluation of confidence interval with 3 sigma rule",
                args_num: 4,
                arguments: vec![
                    ArgumentSpec {
                        name: "center function",
                        arg_type: ArgType::String,
                        fixed_values: vec!["'mean'", "'median'"],
                        placeholder: "'mean'",
                        description: "Function for measuring center",
                    },
                    ArgumentSpec {
                        name: "k",
                        arg_type: ArgType::Number,
                        fixed_values: vec!["1", "2", "3"],
                        placeholder: "1",
                        description: "Sigma coefficient",
                    },
                    ArgumentSpec {
                        name: "stats number",
                        arg_type: ArgType::Number,
                        fixed_values: vec![],
                        placeholder: "20",
                        description: "Statistics number used to calculate confidence interval",
                    },
                    ArgumentSpec {
                        name: "delta",
                        arg_type: ArgType::Boolean,
                        fixed_values: vec!["true", "false"],
                        placeholder: "false",
                        description: "Delta calculation indicator",
                    },
                ],
            },
        }
    }

    fn center(center_fn: &str, sample: &DescriptiveStats) -> f64 {
        if center_fn == "mean" {
            sample.mean()
        } else {
            sample.percentile(50.0)
        }
    }

    async fn apply_without_delta(
        &self,
        value: f64,
        center_fn: &str,
        k: i64,
        window: usize,
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        let values = historical_metric_values(ctx, window).await?;

        // Sparse history is not itself anomalous: skip as fulfilled.
        if values.len() <= 1 {
            debug!(
                column = %ctx.stats.column,
                samples = values.len(),
                "Not enough history for confidence interval, skipping"
            );
            return Ok(Verdict::fulfilled());
        }

        let sample = DescriptiveStats::from_values(values);
        let center = Self::center(center_fn, &sample);
        let sigma = sample.population_std_dev();
        let from = center - k as f64 * sigma;
        let to = center + k as f64 * sigma;

        debug!(
            value,
            center, sigma, from, to, "Confidence interval computed"
        );

        if value < from || to < value {
            return Ok(Verdict::not_fulfilled(format!(
                "TaskStats [{}], {}.{} = {:.6}, interval = [{:.6} ; {:.6}]",
                ctx.stats.id, ctx.stats.column, ctx.metric, value, from, to
            )));
        }
        Ok(Verdict::fulfilled())
    }

    async fn apply_with_delta(
        &self,
        value: f64,
        center_fn: &str,
        k: i64,
        window: usize,
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        // One extra point: n+1 samples form n first differences.
        let values = historical_metric_values(ctx, window + 1).await?;

        if values.len() <= 2 {
            debug!(
                column = %ctx.stats.column,
                samples = values.len(),
                "Not enough history for delta confidence interval, skipping"
            );
            return Ok(Verdict::fulfilled());
        }

        // Values are ordered nominal-date descending, so values[0] is the
        // most recent historical run.
        let current_delta = value - values[0];
        let mut deltas = DescriptiveStats::new();
        for pair in values.windows(2) {
            deltas.push(pair[0] - pair[1]);
        }

        let center = Self::center(center_fn, &deltas);
        let sigma = deltas.population_std_dev();
        let from = center - k as f64 * sigma;
        let to = center + k as f64 * sigma;

        debug!(
            value,
            current_delta, center, sigma, from, to, "Delta confidence interval computed"
        );

        if current_delta < from || to < current_delta {
            return Ok(Verdict::not_fulfilled(format!(
                "TaskStats [{}], {}.{} = {:.6}, delta = {:.6}, interval = [{:.6} ; {:.6}]",
                ctx.stats.id, ctx.stats.column, ctx.metric, value, current_delta, from, to
            )));
        }
        Ok(Verdict::fulfilled())
    }
}

impl Default for ConfidenceIntervalSigma {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckFunction for ConfidenceIntervalSigma {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn apply(
        &self,
        value: f64,
        args: &[ArgValue],
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        if args.len() != 4 {
            return Err(DomainError::InvalidCondition(format!(
                "Function confidence_interval_sigma takes 4 arguments, not {}",
                args.len()
            )));
        }

        let center_fn = args[0].as_text()?.to_string();
        let k = args[1].as_number()? as i64;
        let window = args[2].as_number()? as i64;
        let delta = args[3].as_bool()?;

        if center_fn != "mean" && center_fn != "median" {
            return Err(DomainError::InvalidCondition(format!(
                "Function confidence_interval_sigma 1st parameter should be 'mean' or 'median', not {}",
                center_fn
            )));
        }
        if !(1..=3).contains(&k) {
            return Err(DomainError::InvalidCondition(format!(
                "Function confidence_interval_sigma 2nd parameter should be {{1, 2, 3}}, not {}",
                k
            )));
        }
        if window < 1 {
            return Err(DomainError::InvalidCondition(format!(
                "Function confidence_interval_sigma 3rd parameter should be positive, not {}",
                window
            )));
        }

        if delta {
            self.apply_with_delta(value, &center_fn, k, window as usize, ctx)
                .await
        } else {
            self.apply_without_delta(value, &center_fn, k, window as usize, ctx)
                .await
        }
    }
}

/// Assembles the historical sample for the context's column.
///
/// Fetches up to `2n` SUCCEEDED runs older than the current one, keeps one
/// run per calendar nominal-day (the one with the latest start time),
/// drops runs that already carry a warning, orders nominal-date
/// descending, truncates to `n`, and projects the target metric of the
/// matching column. Runs whose metric was never computed contribute
/// nothing.
async fn historical_metric_values(
    ctx: &EvalContext<'_>,
    n: usize,
) -> Result<Vec<f64>, DomainError> {
    collect(ctx, n).await.map_err(|e| match e {
        DriftwatchError::Domain(domain) => domain,
        other => DomainError::InvalidCondition(format!("history query failed: {}", other)),
    })
}

async fn collect(ctx: &EvalContext<'_>, n: usize) -> Result<Vec<f64>, DriftwatchError> {
    use std::collections::HashMap;

    let candidates = ctx
        .store
        .last_succeeded_tasks(ctx.project.id, &ctx.task.name, ctx.task.nominal_date, 2 * n)
        .await?;

    // One run per calendar nominal-day, latest start wins.
    let mut by_day: HashMap<chrono::NaiveDate, crate::domain::model::Task> = HashMap::new();
    for task in candidates {
        let day = task.nominal_date.date_naive();
        match by_day.get(&day) {
            Some(kept) if kept.start_date >= task.start_date => {}
            _ => {
                by_day.insert(day, task);
            }
        }
    }

    // Flagged runs are poisoned history: exclude them from the baseline.
    let mut survivors = Vec::with_capacity(by_day.len());
    for task in by_day.into_values() {
        if ctx.store.warnings_for(task.id).await?.is_empty() {
            survivors.push(task);
        }
    }
    survivors.sort_by(|a, b| b.nominal_date.cmp(&a.nominal_date));
    survivors.truncate(n);

    let mut values = Vec::with_capacity(survivors.len());
    for task in &survivors {
        for stats in ctx.store.stats_for(task.id).await? {
            if stats.column.eq_ignore_ascii_case(&ctx.stats.column) {
                if let Some(value) = stats.metric_value(ctx.metric) {
                    values.push(value);
                }
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::model::{Metric, Project, Task, TaskState, TaskStats, Warning};
    use crate::infrastructure::memory::InMemoryStore;
    use crate::ports::store::TaskStore;
    use chrono::{DateTime, Utc};

    const COLUMN: &str = "stg.stg_task.cnt";

    fn date(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn project() -> Project {
        Project {
            id: 1,
            name: "TestProject".into(),
        }
    }

    /// Seeds one succeeded run with a single `count` stats row.
    async fn seed_run(store: &InMemoryStore, nominal: &str, start: &str, count: i64) -> Task {
        let task = store
            .insert_task(Task {
                id: 0,
                project_id: 1,
                name: "TestTask".into(),
                state: TaskState::Succeeded,
                start_date: date(start),
                nominal_date: date(nominal),
                analyzed: false,
            })
            .await;
        store
            .insert_stats(TaskStats {
                id: 0,
                task_id: task.id,
                column: COLUMN.into(),
                count: Some(count),
                ..Default::default()
            })
            .await;
        task
    }

    async fn seed_baseline(store: &InMemoryStore) {
        seed_run(store, "2020-07-01T08:00:00Z", "2020-07-01T08:00:00Z", 10).await;
        seed_run(store, "2020-07-02T08:00:00Z", "2020-07-02T08:00:00Z", 40).await;
        seed_run(store, "2020-07-03T08:00:00Z", "2020-07-03T08:00:00Z", 60).await;
        // Two runs on 07-04: the later start (count=50) must win the day.
        seed_run(store, "2020-07-04T08:00:00Z", "2020-07-04T08:00:00Z", 10).await;
        seed_run(store, "2020-07-04T08:00:00Z", "2020-07-04T12:00:00Z", 50).await;
    }

    async fn evaluate(store: &InMemoryStore, count: i64, expr_args: &[ArgValue]) -> Verdict {
        let current = seed_run(store, "2020-07-05T08:00:00Z", "2020-07-05T08:00:00Z", count).await;
        let stats = store.stats_for(current.id).await.unwrap().remove(0);
        let project = project();
        let ctx = EvalContext {
            project: &project,
            task: &current,
            stats: &stats,
            metric: Metric::Count,
            store,
        };
        ConfidenceIntervalSigma::new()
            .apply(stats.metric_value(Metric::Count).unwrap(), expr_args, &ctx)
            .await
            .unwrap()
    }

    fn args(center: &str, k: f64, n: f64, delta: bool) -> Vec<ArgValue> {
        vec![
            ArgValue::Text(center.to_string()),
            ArgValue::Number(k),
            ArgValue::Number(n),
            ArgValue::Bool(delta),
        ]
    }

    #[tokio::test]
    async fn test_value_inside_interval_is_fulfilled() {
        // Window 3 -> {50, 60, 40}: mean 50, sigma ~8.165 -> [41.84, 58.17]
        let store = InMemoryStore::new();
        seed_baseline(&store).await;
        let verdict = evaluate(&store, 57, &args("mean", 1.0, 3.0, false)).await;
        assert!(verdict.fulfilled);
    }

    #[tokio::test]
    async fn test_value_outside_interval_is_flagged() {
        let store = InMemoryStore::new();
        seed_baseline(&store).await;
        let verdict = evaluate(&store, 90, &args("mean", 1.0, 3.0, false)).await;
        assert!(!verdict.fulfilled);
        assert!(
            verdict.message.contains("interval = [41.835"),
            "unexpected message: {}",
            verdict.message
        );
    }

    #[tokio::test]
    async fn test_fewer_than_two_samples_skips_the_check() {
        let store = InMemoryStore::new();
        seed_run(&store, "2020-07-04T08:00:00Z", "2020-07-04T08:00:00Z", 10).await;
        let verdict = evaluate(&store, 1_000_000, &args("mean", 1.0, 3.0, false)).await;
        assert!(verdict.fulfilled);
    }

    #[tokio::test]
    async fn test_warned_run_never_enters_the_baseline() {
        let store = InMemoryStore::new();
        seed_baseline(&store).await;
        // Flag the 07-03 run (count=60): baseline becomes {50, 40, 10}
        // -> mean ~33.33, sigma ~17.0 -> [16.3, 50.4]; 57 is now outside.
        let flagged = store
            .last_succeeded_tasks(1, "TestTask", date("2020-07-03T09:00:00Z"), 10)
            .await
            .unwrap()
            .remove(0);
        store
            .save_warnings(vec![Warning::new(flagged.id, "flagged earlier")])
            .await
            .unwrap();

        let verdict = evaluate(&store, 57, &args("mean", 1.0, 3.0, false)).await;
        assert!(!verdict.fulfilled);
    }

    #[tokio::test]
    async fn test_delta_mode_flags_a_jump() {
        // History 10, 15, 30, then 40 on 07-04 (latest start of the day).
        // Window n+1=4 desc -> {40, 30, 15, 10}, deltas {10, 15, 5}:
        // mean 10, sigma ~4.08 -> [5.92, 14.08]. Current 100 -> delta 60.
        let store = InMemoryStore::new();
        seed_run(&store, "2020-07-01T08:00:00Z", "2020-07-01T08:00:00Z", 10).await;
        seed_run(&store, "2020-07-02T08:00:00Z", "2020-07-02T08:00:00Z", 15).await;
        seed_run(&store, "2020-07-03T08:00:00Z", "2020-07-03T08:00:00Z", 30).await;
        seed_run(&store, "2020-07-04T08:00:00Z", "2020-07-04T08:00:00Z", 5).await;
        seed_run(&store, "2020-07-04T08:00:00Z", "2020-07-04T12:00:00Z", 40).await;

        let verdict = evaluate(&store, 100, &args("mean", 1.0, 3.0, true)).await;
        assert!(!verdict.fulfilled);
        assert!(
            verdict.message.contains("delta = 60.000000"),
            "unexpected message: {}",
            verdict.message
        );
    }

    #[tokio::test]
    async fn test_delta_mode_needs_three_samples() {
        let store = InMemoryStore::new();
        seed_run(&store, "2020-07-03T08:00:00Z", "2020-07-03T08:00:00Z", 10).await;
        seed_run(&store, "2020-07-04T08:00:00Z", "2020-07-04T08:00:00Z", 500).await;
        let verdict = evaluate(&store, 1_000_000, &args("mean", 1.0, 3.0, true)).await;
        assert!(verdict.fulfilled);
    }

    #[tokio::test]
    async fn test_invalid_center_function_is_a_hard_error() {
        let store = InMemoryStore::new();
        seed_baseline(&store).await;
        let current = seed_run(&store, "2020-07-05T08:00:00Z", "2020-07-05T08:00:00Z", 57).await;
        let stats = store.stats_for(current.id).await.unwrap().remove(0);
        let project = project();
        let ctx = EvalContext {
            project: &project,
            task: &current,
            stats: &stats,
            metric: Metric::Count,
            store: &store,
        };
        let result = ConfidenceIntervalSigma::new()
            .apply(57.0, &args("meann", 1.0, 3.0, false), &ctx)
            .await;
        assert!(matches!(result, Err(DomainError::InvalidCondition(_))));
    }

    #[tokio::test]
    async fn test_invalid_sigma_coefficient_is_a_hard_error() {
        let store = InMemoryStore::new();
        let current = seed_run(&store, "2020-07-05T08:00:00Z", "2020-07-05T08:00:00Z", 57).await;
        let stats = store.stats_for(current.id).await.unwrap().remove(0);
        let project = project();
        let ctx = EvalContext {
            project: &project,
            task: &current,
            stats: &stats,
            metric: Metric::Count,
            store: &store,
        };
        let result = ConfidenceIntervalSigma::new()
            .apply(57.0, &args("mean", 4.0, 3.0, false), &ctx)
            .await;
        assert!(matches!(result, Err(DomainError::InvalidCondition(_))));
    }
}
