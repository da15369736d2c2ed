// driftwatch-core/src/domain/model/rule.rs

use serde::{Deserialize, Serialize};

/// A user-authored data-quality rule: a set of conditions on the columns
/// of one table, evaluated for runs of one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub project_id: i64,
    /// Target table, `schema.table`.
    pub table_name: String,
    pub task_name: String,
    #[serde(default)]
    pub caption: String,
    /// Owned conditions, cascade-deleted with the rule by the store.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// One constraint: a function-call expression evaluated against a single
/// metric of a single column. The expression must parse and reference a
/// known function with matching arity/types (enforced at validation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: i64,
    pub rule_id: i64,
    /// Column name without table prefix.
    pub column_name: String,
    pub metric: Metric,
    /// `function(arg1,arg2,...)`, single-quoted string literals.
    pub expression: String,
}

/// An unvalidated condition as authored (metric still raw text).
/// Only a `ConditionDraft` that passes validation may become a `Condition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDraft {
    pub column_name: String,
    pub metric: String,
    pub expression: String,
}

/// Closed set of scalar metrics, each mapping 1:1 to a `TaskStats` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "total_count")]
    TotalCount,
    #[serde(rename = "unique_count")]
    UniqueCount,
    #[serde(rename = "mean")]
    Mean,
    #[serde(rename = "std_dev")]
    StdDev,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "quantile_5")]
    Quantile5,
    #[serde(rename = "quantile_15")]
    Quantile15,
    #[serde(rename = "quantile_25")]
    Quantile25,
    #[serde(rename = "quantile_50")]
    Quantile50,
    #[serde(rename = "quantile_75")]
    Quantile75,
    #[serde(rename = "quantile_90")]
    Quantile90,
    #[serde(rename = "quantile_95")]
    Quantile95,
}

impl Metric {
    pub const ALL: [Metric; 14] = [
        Metric::Count,
        Metric::TotalCount,
        Metric::UniqueCount,
        Metric::Mean,
        Metric::StdDev,
        Metric::Min,
        Metric::Max,
        Metric::Quantile5,
        Metric::Quantile15,
        Metric::Quantile25,
        Metric::Quantile50,
        Metric::Quantile75,
        Metric::Quantile90,
        Metric::Quantile95,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Count => "count",
            Metric::TotalCount => "total_count",
            Metric::UniqueCount => "unique_count",
            Metric::Mean => "mean",
            Metric::StdDev => "std_dev",
            Metric::Min => "min",
            Metric::Max => "max",
            Metric::Quantile5 => "quantile_5",
            Metric::Quantile15 => "quantile_15",
            Metric::Quantile25 => "quantile_25",
            Metric::Quantile50 => "quantile_50",
            Metric::Quantile75 => "quantile_75",
            Metric::Quantile90 => "quantile_90",
            Metric::Quantile95 => "quantile_95",
        }
    }

    pub fn from_name(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
