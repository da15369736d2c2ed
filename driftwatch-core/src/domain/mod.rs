pub mod dq;
pub mod error;
pub mod model;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
