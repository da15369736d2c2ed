// driftwatch-core/src/domain/model/mod.rs

pub mod project;
pub mod rule;
pub mod stats;
pub mod task;
pub mod warning;

// Re-exports
pub use project::Project;
pub use rule::{Condition, ConditionDraft, Metric, Rule};
pub use stats::{ColumnType, TaskStats};
pub use task::{Task, TaskState};
pub use warning::Warning;
