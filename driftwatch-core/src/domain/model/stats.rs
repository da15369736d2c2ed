// driftwatch-core/src/domain/model/stats.rs

use serde::{Deserialize, Serialize};

use crate::domain::model::rule::Metric;

/// Column-level statistics snapshot for one task run, produced by an
/// external profiler. Read-only here. Every metric field is optional:
/// absent means "never computed", which is NOT the same as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStats {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub task_id: i64,
    /// Fully-qualified column, `schema.table.column`.
    pub column: String,
    #[serde(default)]
    pub column_type: ColumnType,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub total_count: Option<i64>,
    pub unique_count: Option<i64>,
    pub count: Option<i64>,
    pub quantile_5: Option<f64>,
    pub quantile_15: Option<f64>,
    pub quantile_25: Option<f64>,
    pub quantile_50: Option<f64>,
    pub quantile_75: Option<f64>,
    pub quantile_90: Option<f64>,
    pub quantile_95: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    #[default]
    String,
    Numeric,
    Object,
}

impl TaskStats {
    /// Maps a metric onto this row. Counts are cast to f64, the other
    /// fields are returned as stored. `None` means the profiler never
    /// computed the metric — callers must treat that as "cannot evaluate",
    /// never as an implicit zero.
    pub fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Count => self.count.map(|v| v as f64),
            Metric::TotalCount => self.total_count.map(|v| v as f64),
            Metric::UniqueCount => self.unique_count.map(|v| v as f64),
            Metric::Mean => self.mean,
            Metric::StdDev => self.std_dev,
            Metric::Min => self.min,
            Metric::Max => self.max,
            Metric::Quantile5 => self.quantile_5,
            Metric::Quantile15 => self.quantile_15,
            Metric::Quantile25 => self.quantile_25,
            Metric::Quantile50 => self.quantile_50,
            Metric::Quantile75 => self.quantile_75,
            Metric::Quantile90 => self.quantile_90,
            Metric::Quantile95 => self.quantile_95,
        }
    }
}
