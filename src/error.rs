//! Error types for fslock.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use thiserror::Error;

/// Main error type for lock operations.
///
/// Contention (the sentinel already existing) is the only condition retried
/// internally by `acquire`; every other failure is surfaced immediately.
#[derive(Error, Debug)]
pub enum LockError {
    /// A timeout was configured without a retry delay.
    #[error("invalid lock configuration: {0}")]
    Configuration(String),

    /// The target file could not be opened for read/write.
    #[error("failed to open target file: {0}")]
    Open(String),

    /// The sentinel is already held and no timeout is configured.
    #[error("lock unavailable: {0}")]
    Unavailable(String),

    /// The sentinel remained contended past the configured timeout.
    #[error("lock timed out: {0}")]
    Timeout(String),

    /// A filesystem error other than contention occurred during acquisition.
    #[error("unexpected I/O error: {0}")]
    UnexpectedIo(String),
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;
