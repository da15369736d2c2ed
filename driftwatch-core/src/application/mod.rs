// driftwatch-core/src/application/mod.rs

pub mod analyze;
pub mod checker;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do `use driftwatch_core::application::{DataQualityChecker, analyze_task};`
// without knowing the internal file layout.

pub use analyze::analyze_task;
pub use checker::DataQualityChecker;
