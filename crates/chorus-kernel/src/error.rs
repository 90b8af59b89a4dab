//! Error types for the sound-source pool.

use thiserror::Error;

/// Errors reported when the pool cannot lend out a source.
///
/// Both variants mean the sound request was dropped. They are logged where
/// they occur, so callers usually only need to skip the sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Ready queue is empty and overflow is disabled.
    #[error(
        "Sound source pool exhausted ({pooled} sources); increase the pooling amount or enable overflow"
    )]
    PoolExhausted {
        /// Number of sources the pool owns.
        pooled: usize,
    },

    /// Ready queue is empty and the overflow ceiling has been reached.
    #[error("Sound source pool reached its capacity of {max} sources")]
    PoolCapacityReached {
        /// Configured maximum pool size.
        max: usize,
    },
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
