// driftwatch-core/src/domain/model/warning.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output of a failed check, attached to a task. Created only by this
/// engine and never mutated; the id is assigned by the store on persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    #[serde(default)]
    pub id: i64,
    pub task_id: i64,
    pub message: String,
    pub created_time: DateTime<Utc>,
}

impl Warning {
    pub fn new(task_id: i64, message: impl Into<String>) -> Self {
        Self {
            id: 0,
            task_id,
            message: message.into(),
            created_time: Utc::now(),
        }
    }
}
