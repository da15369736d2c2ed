// driftwatch-core/src/domain/model/project.rs

use serde::{Deserialize, Serialize};

/// A tracked data-pipeline project. Owned by the external tracker;
/// the engine only reads it to scope history queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}
