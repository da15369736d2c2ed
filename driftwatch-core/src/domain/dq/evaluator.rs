// driftwatch-core/src/domain/dq/evaluator.rs

// Evaluates one condition against one statistics row.
//
// The legacy design mutated project/task/stats fields on long-lived
// function singletons and serialized every evaluation behind a lock.
// Here the context is built per call and handed to the function as an
// argument, so no lock exists at all.

use tracing::debug;

use crate::domain::dq::function::{ArgValue, EvalContext, Verdict};
use crate::domain::dq::registry::FunctionRegistry;
use crate::domain::dq::syntax;
use crate::domain::error::DomainError;
use crate::domain::model::{Condition, Project, Task, TaskStats};
use crate::ports::store::TaskStore;

pub struct ExpressionEvaluator {
    registry: FunctionRegistry,
}

impl ExpressionEvaluator {
    pub fn new(registry: FunctionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Evaluates `condition` for `stats`. A metric the profiler never
    /// computed yields a not-fulfilled verdict with a diagnostic, and the
    /// function is NOT invoked.
    pub async fn is_fulfilled(
        &self,
        project: &Project,
        task: &Task,
        stats: &TaskStats,
        condition: &Condition,
        store: &dyn TaskStore,
    ) -> Result<Verdict, DomainError> {
        let Some(value) = stats.metric_value(condition.metric) else {
            return Ok(Verdict::not_fulfilled(format!(
                "Metric {} for TaskStats {} is null",
                condition.metric, stats.id
            )));
        };

        let expression = syntax::strip_whitespace(&condition.expression);
        let name = syntax::function_name(&expression)?;
        let function = self
            .registry
            .resolve(name)
            .ok_or_else(|| DomainError::UnknownFunction(name.to_string()))?;

        let args = syntax::arguments(&expression)?
            .iter()
            .map(|token| parse_argument(token))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            condition = condition.id,
            column = %stats.column,
            metric = %condition.metric,
            value,
            "Evaluating condition"
        );

        let ctx = EvalContext {
            project,
            task,
            stats,
            metric: condition.metric,
            store,
        };
        function.apply(value, &args, &ctx).await
    }
}

/// Decodes one verbatim token: `'text'` stays a string, `true`/`false`
/// become booleans, anything else must be a number.
fn parse_argument(token: &str) -> Result<ArgValue, DomainError> {
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return Ok(ArgValue::Text(token[1..token.len() - 1].to_string()));
    }
    match token {
        "true" => Ok(ArgValue::Bool(true)),
        "false" => Ok(ArgValue::Bool(false)),
        _ => token
            .parse::<f64>()
            .map(ArgValue::Number)
            .map_err(|_| DomainError::InvalidArgument(token.to_string())),
    }
}
