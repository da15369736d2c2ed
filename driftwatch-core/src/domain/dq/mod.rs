// driftwatch-core/src/domain/dq/mod.rs

pub mod descriptive;
pub mod evaluator;
pub mod function;
pub mod functions;
pub mod interval;
pub mod registry;
pub mod syntax;
pub mod validator;

// Re-exports
pub use descriptive::DescriptiveStats;
pub use evaluator::ExpressionEvaluator;
pub use function::{ArgType, ArgValue, ArgumentSpec, CheckFunction, EvalContext, FunctionDescriptor, Verdict};
pub use registry::FunctionRegistry;
pub use validator::ConditionValidator;
