// driftwatch-core/src/domain/dq/functions.rs

// Threshold and range built-ins. The confidence-interval built-in lives
// in interval.rs, it is the only one that reads history.

use async_trait::async_trait;

use crate::domain::dq::function::{
    ArgType, ArgValue, ArgumentSpec, CheckFunction, EvalContext, FunctionDescriptor, Verdict,
};
use crate::domain::error::DomainError;

fn check_arity(name: &str, expected: usize, args: &[ArgValue]) -> Result<(), DomainError> {
    if args.len() != expected {
        return Err(DomainError::InvalidCondition(format!(
            "Function {} takes {} arguments, not {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

// --- is_above ---

pub struct IsAbove {
    descriptor: FunctionDescriptor,
}

impl IsAbove {
    pub fn new() -> Self {
        Self {
            descriptor: FunctionDescriptor {
                name: "is_above",
                description: "Fulfilled when the metric is strictly above x",
                args_num: 1,
                arguments: vec![ArgumentSpec {
                    name: "x",
                    arg_type: ArgType::Number,
                    fixed_values: vec![],
                    placeholder: "3000000",
                    description: "Min value",
                }],
            },
        }
    }
}

impl Default for IsAbove {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckFunction for IsAbove {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn apply(
        &self,
        value: f64,
        args: &[ArgValue],
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        check_arity("is_above", 1, args)?;
        let x = args[0].as_number()?;

        if value > x {
            Ok(Verdict::fulfilled())
        } else {
            Ok(Verdict::not_fulfilled(format!(
                "TaskStats [{}], metric {} = {:.6} is not above {:.6}",
                ctx.stats.id, ctx.metric, value, x
            )))
        }
    }
}

// --- is_below ---

pub struct IsBelow {
    descriptor: FunctionDescriptor,
}

impl IsBelow {
    pub fn new() -> Self {
        Self {
            descriptor: FunctionDescriptor {
                name: "is_below",
                description: "Fulfilled when the metric is strictly below x",
                args_num: 1,
                arguments: vec![ArgumentSpec {
                    name: "x",
                    arg_type: ArgType::Number,
                    fixed_values: vec![],
                    placeholder: "3000000",
                    description: "Max value",
                }],
            },
        }
    }
}

impl Default for IsBelow {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckFunction for IsBelow {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn apply(
        &self,
        value: f64,
        args: &[ArgValue],
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        check_arity("is_below", 1, args)?;
        let x = args[0].as_number()?;

        if value < x {
            Ok(Verdict::fulfilled())
        } else {
            Ok(Verdict::not_fulfilled(format!(
                "TaskStats [{}], metric {} = {:.6} is not below {:.6}",
                ctx.stats.id, ctx.metric, value, x
            )))
        }
    }
}

// --- is_within_range ---

pub struct WithinRange {
    descriptor: FunctionDescriptor,
}

impl WithinRange {
    pub fn new() -> Self {
        Self {
            descriptor: FunctionDescriptor {
                name: "is_within_range",
                description: "Fulfilled when x <= metric <= y",
                args_num: 2,
                arguments: vec![
                    ArgumentSpec {
                        name: "x",
                        arg_type: ArgType::Number,
                        fixed_values: vec![],
                        placeholder: "1000",
                        description: "Min value",
                    },
                    ArgumentSpec {
                        name: "y",
                        arg_type: ArgType::Number,
                        fixed_values: vec![],
                        placeholder: "3000",
                        description: "Max value",
                    },
                ],
            },
        }
    }
}

impl Default for WithinRange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckFunction for WithinRange {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn apply(
        &self,
        value: f64,
        args: &[ArgValue],
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        check_arity("is_within_range", 2, args)?;
        let min = args[0].as_number()?;
        let max = args[1].as_number()?;

        if min <= value && value <= max {
            Ok(Verdict::fulfilled())
        } else {
            Ok(Verdict::not_fulfilled(format!(
                "TaskStats [{}], metric {} = {:.6} is not between {:.6} and {:.6}",
                ctx.stats.id, ctx.metric, value, min, max
            )))
        }
    }
}

// --- is_outside_range ---

pub struct OutsideRange {
    descriptor: FunctionDescriptor,
}

impl OutsideRange {
    pub fn new() -> Self {
        Self {
            descriptor: FunctionDescriptor {
                name: "is_outside_range",
                description: "Fulfilled when the metric is outside [x, y]",
                args_num: 2,
                arguments: vec![
                    ArgumentSpec {
                        name: "x",
                        arg_type: ArgType::Number,
                        fixed_values: vec![],
                        placeholder: "1000",
                        description: "Min value",
                    },
                    ArgumentSpec {
                        name: "y",
                        arg_type: ArgType::Number,
                        fixed_values: vec![],
                        placeholder: "3000",
                        description: "Max value",
                    },
                ],
            },
        }
    }
}

impl Default for OutsideRange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckFunction for OutsideRange {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn apply(
        &self,
        value: f64,
        args: &[ArgValue],
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError> {
        check_arity("is_outside_range", 2, args)?;
        let min = args[0].as_number()?;
        let max = args[1].as_number()?;

        if min > max {
            return Err(DomainError::InvalidCondition(
                "Function is_outside_range: min should be less than max".to_string(),
            ));
        }

        // Exact complement of is_within_range: bounds belong to "within".
        if value < min || max < value {
            Ok(Verdict::fulfilled())
        } else {
            Ok(Verdict::not_fulfilled(format!(
                "TaskStats [{}], metric {} = {:.6} is not less than {:.6} or greater than {:.6}",
                ctx.stats.id, ctx.metric, value, min, max
            )))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dq::function::EvalContext;
    use crate::domain::model::{Metric, Project, Task, TaskState, TaskStats};
    use crate::infrastructure::memory::InMemoryStore;
    use chrono::Utc;

    fn fixture() -> (Project, Task, TaskStats) {
        let project = Project {
            id: 1,
            name: "TestProject".into(),
        };
        let task = Task {
            id: 10,
            project_id: 1,
            name: "TestTask".into(),
            state: TaskState::Succeeded,
            start_date: Utc::now(),
            nominal_date: Utc::now(),
            analyzed: false,
        };
        let stats = TaskStats {
            id: 100,
            task_id: 10,
            column: "stg.test_task.ind_1".into(),
            max: Some(98.0),
            ..Default::default()
        };
        (project, task, stats)
    }

    async fn run(
        function: &dyn CheckFunction,
        value: f64,
        args: &[ArgValue],
    ) -> Result<Verdict, DomainError> {
        let (project, task, stats) = fixture();
        let store = InMemoryStore::new();
        let ctx = EvalContext {
            project: &project,
            task: &task,
            stats: &stats,
            metric: Metric::Max,
            store: &store,
        };
        function.apply(value, args, &ctx).await
    }

    #[tokio::test]
    async fn test_is_above_boundaries() {
        let f = IsAbove::new();
        assert!(run(&f, 10.0, &[ArgValue::Number(5.0)]).await.unwrap().fulfilled);
        // Equality is not "above"
        assert!(!run(&f, 5.0, &[ArgValue::Number(5.0)]).await.unwrap().fulfilled);
    }

    #[tokio::test]
    async fn test_is_below_message_embeds_value_and_bound() {
        let f = IsBelow::new();
        let verdict = run(&f, 98.0, &[ArgValue::Number(90.0)]).await.unwrap();
        assert!(!verdict.fulfilled);
        assert_eq!(
            verdict.message,
            "TaskStats [100], metric max = 98.000000 is not below 90.000000"
        );
    }

    #[tokio::test]
    async fn test_within_range_includes_boundaries() {
        let f = WithinRange::new();
        let args = [ArgValue::Number(10.0), ArgValue::Number(20.0)];
        assert!(run(&f, 10.0, &args).await.unwrap().fulfilled);
        assert!(run(&f, 20.0, &args).await.unwrap().fulfilled);
        assert!(!run(&f, 9.9, &args).await.unwrap().fulfilled);
    }

    #[tokio::test]
    async fn test_outside_range_rejects_inverted_bounds() {
        let f = OutsideRange::new();
        let args = [ArgValue::Number(20.0), ArgValue::Number(10.0)];
        assert!(matches!(
            run(&f, 15.0, &args).await,
            Err(DomainError::InvalidCondition(_))
        ));
    }

    /// is_within_range(x,y) fulfilled <=> is_outside_range(x,y) not
    /// fulfilled, for all x <= y, boundary equality included.
    #[tokio::test]
    async fn test_within_and_outside_are_complementary() {
        let within = WithinRange::new();
        let outside = OutsideRange::new();
        let args = [ArgValue::Number(10.0), ArgValue::Number(20.0)];

        for value in [5.0, 10.0, 10.1, 15.0, 19.9, 20.0, 25.0] {
            let inside = run(&within, value, &args).await.unwrap().fulfilled;
            let out = run(&outside, value, &args).await.unwrap().fulfilled;
            assert_ne!(inside, out, "value {} must fulfil exactly one", value);
        }
    }

    #[tokio::test]
    async fn test_wrong_arity_is_a_hard_error() {
        let f = IsAbove::new();
        assert!(matches!(
            run(&f, 1.0, &[]).await,
            Err(DomainError::InvalidCondition(_))
        ));
    }
}
