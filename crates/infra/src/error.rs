//! Infrastructure error model.

use thiserror::Error;

use naycourse_core::DomainError;

/// Storage operation error.
///
/// These are infrastructure failures, as opposed to deterministic domain
/// failures which live in [`DomainError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not serve the request (I/O, lock poisoned, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A conditional write found the stored record changed (or gone) since it
    /// was read.
    #[error("concurrent modification: {0}")]
    Concurrency(String),

    /// A uniqueness constraint was violated.
    #[error("duplicate: {0}")]
    Duplicate(String),
}

/// Error type surfaced by the application services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
