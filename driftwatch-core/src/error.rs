// driftwatch-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriftwatchError {
    // --- ERREURS DU DOMAINE (Règles métier, Expressions, Checks) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),

    // --- STORE (port implementations surface their failures here) ---
    #[error("Store Error: {0}")]
    StoreError(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for DriftwatchError {
    fn from(err: std::io::Error) -> Self {
        DriftwatchError::Infrastructure(InfrastructureError::Io(err))
    }
}
