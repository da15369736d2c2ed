// driftwatch-core/src/domain/dq/validator.rs

// Validates one authored condition end-to-end before it may be saved.
// The checks are ordered and the first four short-circuit: once the
// expression does not parse or the function is unknown, the later checks
// are meaningless.

use crate::domain::dq::function::ArgType;
use crate::domain::dq::registry::FunctionRegistry;
use crate::domain::dq::syntax;
use crate::domain::model::{ConditionDraft, Metric};

pub struct ConditionValidator<'a> {
    registry: &'a FunctionRegistry,
}

impl<'a> ConditionValidator<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Returns every violation found; an empty list means the draft may
    /// become a persisted `Condition`.
    pub fn validate(&self, draft: &ConditionDraft) -> Vec<String> {
        let mut violations = Vec::new();

        // 1. Metric must be a known enum member.
        if Metric::from_name(&draft.metric).is_none() {
            violations.push(format!("Metric {} does not exist", draft.metric));
            return violations;
        }

        // 2. Expression must be lexically parseable.
        let expression = syntax::strip_whitespace(&draft.expression);
        let (name, params) = match syntax::function_name(&expression)
            .and_then(|name| syntax::arguments(&expression).map(|args| (name, args)))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                violations.push(e.to_string());
                return violations;
            }
        };

        // 3. Function must resolve.
        let Some(function) = self.registry.resolve(name) else {
            violations.push(format!("Function {} does not exist", name));
            return violations;
        };
        let descriptor = function.descriptor();

        // 4. Declared arity.
        if params.len() != descriptor.args_num {
            violations.push(format!(
                "Function {} takes {} arguments",
                name, descriptor.args_num
            ));
            return violations;
        }

        // 5. Per-argument checks (no short-circuit: report all of them).
        for (i, (param, spec)) in params.iter().zip(descriptor.arguments.iter()).enumerate() {
            let position = i + 1;
            if !spec.fixed_values.is_empty() {
                // The literal token, quotes included, must be a member.
                if !spec.fixed_values.iter().any(|v| v == param) {
                    violations.push(format!(
                        "{} argument of function {} can only take these values [{}]",
                        position,
                        name,
                        spec.fixed_values.join(", ")
                    ));
                }
            } else {
                match spec.arg_type {
                    ArgType::Number => {
                        if param.parse::<i64>().is_err() {
                            violations.push(format!(
                                "{} argument of function {} should be of type number",
                                position, name
                            ));
                        }
                    }
                    ArgType::String => {
                        if param.chars().any(|c| c.is_ascii_digit()) {
                            violations.push(format!(
                                "{} argument of function {} should be of type string",
                                position, name
                            ));
                        }
                    }
                    // Booleans only occur with fixed values, handled above.
                    ArgType::Boolean => {}
                }
            }
        }

        violations
    }
}
