// driftwatch-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contracts towards the task/statistics store.
pub mod ports;

// 2. Domain (Cœur du métier)
// Rule model, expression language, built-in check functions.
// Depends on the ports only (the interval check reads history).
pub mod domain;

// 3. Infrastructure (Adapters)
// YAML loaders and the in-memory store adapter.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (basic checks, rule checks, analyze).
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// Permet d'importer l'erreur principale facilement : use driftwatch_core::DriftwatchError;
pub use error::DriftwatchError;
