// driftwatch-core/src/infrastructure/config/rules.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::model::{Condition, ConditionDraft, Metric, Rule};
use crate::infrastructure::error::InfrastructureError;

// --- RULES FILE (YAML) ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub table_name: String,
    pub task_name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub conditions: Vec<ConditionConfig>,
}

/// One condition as authored in YAML. The metric stays raw text so the
/// whole file can be validated and every violation reported at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionConfig {
    pub column_name: String,
    pub metric: String,
    pub expression: String,
}

#[instrument(skip(path))]
pub fn load_rules(path: &Path) -> Result<RulesFile, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(format!("{:?}", path)));
    }
    let content = fs::read_to_string(path)?;
    let file: RulesFile = serde_yaml::from_str(&content)?;
    info!(path = ?path, rules = file.rules.len(), "Rules file loaded");
    Ok(file)
}

impl RulesFile {
    /// Every condition of every rule as an unvalidated draft, paired with
    /// its 1-based (rule, condition) position for reporting.
    pub fn drafts(&self) -> Vec<((usize, usize), ConditionDraft)> {
        let mut out = Vec::new();
        for (r, rule) in self.rules.iter().enumerate() {
            for (c, condition) in rule.conditions.iter().enumerate() {
                out.push((
                    (r + 1, c + 1),
                    ConditionDraft {
                        column_name: condition.column_name.clone(),
                        metric: condition.metric.clone(),
                        expression: condition.expression.clone(),
                    },
                ));
            }
        }
        out
    }

    /// Materializes persisted rules with sequential ids. Fails on any
    /// unknown metric, so callers should validate the drafts first.
    pub fn into_rules(self, project_id: i64) -> Result<Vec<Rule>, InfrastructureError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        let mut next_condition_id = 0i64;
        for (r, config) in self.rules.into_iter().enumerate() {
            let rule_id = r as i64 + 1;
            let mut conditions = Vec::with_capacity(config.conditions.len());
            for condition in config.conditions {
                let Some(metric) = Metric::from_name(&condition.metric) else {
                    return Err(InfrastructureError::ConfigError(format!(
                        "Metric {} does not exist",
                        condition.metric
                    )));
                };
                next_condition_id += 1;
                conditions.push(Condition {
                    id: next_condition_id,
                    rule_id,
                    column_name: condition.column_name,
                    metric,
                    expression: condition.expression,
                });
            }
            rules.push(Rule {
                id: rule_id,
                project_id,
                table_name: config.table_name,
                task_name: config.task_name,
                caption: config.caption,
                conditions,
            });
        }
        Ok(rules)
    }
}
