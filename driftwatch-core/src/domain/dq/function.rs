// driftwatch-core/src/domain/dq/function.rs

// Contract shared by every built-in check function.
//
// Functions carry no state between calls: the evaluation context
// (project, task, stats row, target metric, history port) is passed as an
// argument on every invocation, so concurrent evaluations for different
// tasks need no lock.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::model::{Metric, Project, Task, TaskStats};
use crate::ports::store::TaskStore;

/// Self-describing catalogue entry. Reused verbatim by the rule-authoring
/// UI and by the validator, so hints and validation never diverge.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub args_num: usize,
    pub arguments: Vec<ArgumentSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub arg_type: ArgType,
    /// Allowed literal tokens, quotes included for strings. Empty means
    /// any token of `arg_type` is allowed.
    pub fixed_values: Vec<&'static str>,
    pub placeholder: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArgType {
    String,
    Number,
    Boolean,
}

/// A typed argument value, decoded from the verbatim token.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl ArgValue {
    pub fn as_number(&self) -> Result<f64, DomainError> {
        match self {
            ArgValue::Number(n) => Ok(*n),
            other => Err(DomainError::InvalidCondition(format!(
                "expected a number argument, got {:?}",
                other
            ))),
        }
    }

    pub fn as_text(&self) -> Result<&str, DomainError> {
        match self {
            ArgValue::Text(s) => Ok(s),
            other => Err(DomainError::InvalidCondition(format!(
                "expected a string argument, got {:?}",
                other
            ))),
        }
    }

    pub fn as_bool(&self) -> Result<bool, DomainError> {
        match self {
            ArgValue::Bool(b) => Ok(*b),
            other => Err(DomainError::InvalidCondition(format!(
                "expected a boolean argument, got {:?}",
                other
            ))),
        }
    }
}

/// Outcome of one condition evaluation: fulfilled or not, plus a
/// diagnostic message (empty when fulfilled).
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub fulfilled: bool,
    pub message: String,
}

impl Verdict {
    pub fn fulfilled() -> Self {
        Self {
            fulfilled: true,
            message: String::new(),
        }
    }

    pub fn not_fulfilled(message: impl Into<String>) -> Self {
        Self {
            fulfilled: false,
            message: message.into(),
        }
    }
}

/// Per-call evaluation context. Built by the evaluator for each
/// (condition, stats row) pair and dropped afterwards.
pub struct EvalContext<'a> {
    pub project: &'a Project,
    pub task: &'a Task,
    pub stats: &'a TaskStats,
    pub metric: Metric,
    pub store: &'a dyn TaskStore,
}

#[async_trait]
pub trait CheckFunction: Send + Sync {
    fn descriptor(&self) -> &FunctionDescriptor;

    /// Applies the check to an already-resolved metric value. Arity and
    /// argument domains are re-checked defensively and raise a hard
    /// error: reaching them means validation let a bad rule through.
    async fn apply(
        &self,
        value: f64,
        args: &[ArgValue],
        ctx: &EvalContext<'_>,
    ) -> Result<Verdict, DomainError>;
}
