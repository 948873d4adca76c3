use aegis_core::error::CoreError;

use crate::store::StorageError;

/// Service-level error type.
///
/// Wraps [`CoreError`] for domain errors and adds variants for storage-port
/// failures and rejected request payloads.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error from `aegis-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the storage port.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A request payload rejected by validator derives.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
