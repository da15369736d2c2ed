// driftwatch-core/src/infrastructure/config/mod.rs

pub mod rules;
pub mod snapshot;

pub use rules::{ConditionConfig, RuleConfig, RulesFile, load_rules};
pub use snapshot::{SnapshotFile, TaskSnapshot, load_snapshot};
