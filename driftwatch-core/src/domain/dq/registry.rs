// driftwatch-core/src/domain/dq/registry.rs

// Catalogue of the built-in check functions. Built once at startup and
// injected wherever needed (validator, evaluator, CLI) — no ambient
// singleton, no runtime registration by end users.

use crate::domain::dq::function::{CheckFunction, FunctionDescriptor};
use crate::domain::dq::functions::{IsAbove, IsBelow, OutsideRange, WithinRange};
use crate::domain::dq::interval::ConfidenceIntervalSigma;

pub struct FunctionRegistry {
    functions: Vec<Box<dyn CheckFunction>>,
}

impl FunctionRegistry {
    /// The fixed built-in catalogue.
    pub fn builtin() -> Self {
        Self {
            functions: vec![
                Box::new(IsAbove::new()),
                Box::new(IsBelow::new()),
                Box::new(WithinRange::new()),
                Box::new(OutsideRange::new()),
                Box::new(ConfidenceIntervalSigma::new()),
            ],
        }
    }

    /// Descriptors in catalogue order, for the rule-authoring UI.
    pub fn descriptors(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter().map(|f| f.descriptor())
    }

    pub fn resolve(&self, name: &str) -> Option<&dyn CheckFunction> {
        self.functions
            .iter()
            .find(|f| f.descriptor().name == name)
            .map(|f| f.as_ref())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
