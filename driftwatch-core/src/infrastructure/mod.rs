// driftwatch-core/src/infrastructure/mod.rs

pub mod config;
pub mod error;
pub mod memory;

pub use error::InfrastructureError;
pub use memory::InMemoryStore;
