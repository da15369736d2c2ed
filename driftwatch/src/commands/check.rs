// driftwatch/src/commands/check.rs
//
// USE CASE: Replay the analysis over a snapshot file. Runs are analyzed
// oldest first so the interval functions see the same history they would
// have seen live. Returns the number of warnings raised.

use std::path::Path;

use driftwatch_core::application::{DataQualityChecker, analyze_task};
use driftwatch_core::domain::dq::evaluator::ExpressionEvaluator;
use driftwatch_core::domain::dq::registry::FunctionRegistry;
use driftwatch_core::infrastructure::config::load_snapshot;
use driftwatch_core::infrastructure::memory::InMemoryStore;

pub async fn execute(snapshot_path: &Path) -> anyhow::Result<usize> {
    println!("⚙️  Loading snapshot from {}...", snapshot_path.display());

    let snapshot = load_snapshot(snapshot_path)?;
    let store = InMemoryStore::new();
    let (project, rules, mut tasks) = snapshot.hydrate(&store).await?;

    println!(
        "   Project: {} ({} rule(s), {} run(s))",
        project.name,
        rules.len(),
        tasks.len()
    );

    tasks.sort_by_key(|t| t.nominal_date);

    let checker = DataQualityChecker::new(ExpressionEvaluator::new(FunctionRegistry::builtin()));

    let mut total = 0usize;
    for task in &tasks {
        let warnings = analyze_task(&checker, &project, task, &rules, &store).await?;
        if warnings.is_empty() {
            println!("   ✅ {} @ {}", task.name, task.nominal_date);
            continue;
        }
        total += warnings.len();
        println!("   ⚠️  {} @ {}", task.name, task.nominal_date);
        for warning in warnings {
            println!("      - {}", warning.message);
        }
    }

    Ok(total)
}
