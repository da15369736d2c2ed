// driftwatch-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Expression '{expression}' is not a function call: {reason}")]
    #[diagnostic(
        code(driftwatch::domain::syntax),
        help("Conditions are written as name(arg1,arg2,...) with single-quoted strings.")
    )]
    ExpressionSyntax { expression: String, reason: String },

    #[error("Function {0} does not exist")]
    #[diagnostic(code(driftwatch::domain::unknown_function))]
    UnknownFunction(String),

    #[error("Metric {0} does not exist")]
    #[diagnostic(code(driftwatch::domain::unknown_metric))]
    UnknownMetric(String),

    #[error("Argument '{0}' cannot be interpreted as a number, boolean or quoted string")]
    #[diagnostic(code(driftwatch::domain::argument))]
    InvalidArgument(String),

    // A condition that validation should have rejected (wrong arity, bad
    // fixed value, min > max). Hard failure, scoped to one condition.
    #[error("Invalid condition: {0}")]
    #[diagnostic(code(driftwatch::domain::invalid_condition))]
    InvalidCondition(String),
}
