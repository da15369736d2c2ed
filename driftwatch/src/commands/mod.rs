// driftwatch/src/commands/mod.rs

pub mod check;
pub mod functions;
pub mod validate;
