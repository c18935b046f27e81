use thiserror::Error;

use rollcall_serde::SerdeErr;

/// Errors raised by a persistent store backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A read or write touched bytes outside the store
    #[error("Access of {length} bytes at address {address} is outside the {capacity}-byte store")]
    OutOfRange {
        address: usize,
        length: usize,
        capacity: usize,
    },

    /// The store is too small for the region layout
    #[error("Store holds {capacity} bytes but the region layout needs {required}")]
    TooSmall { capacity: usize, required: usize },

    /// Flushing to the medium failed. Data written since the last commit may not survive power loss
    #[error("Failed to commit store to its medium: {reason}")]
    CommitFailed { reason: String },
}

/// Errors returned when a record cannot be written at the requested address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// The record would extend past the end of the store. Nothing was written
    #[error("Record of {length} bytes at address {address} overflows the {capacity}-byte store; write rejected")]
    OutOfRange {
        address: usize,
        length: usize,
        capacity: usize,
    },

    /// The record wrote more than its declared width
    #[error("Record encoding failed: {0}")]
    Encoding(#[from] SerdeErr),

    /// The backend rejected the write
    #[error("Store rejected write: {0}")]
    Store(#[from] StoreError),
}

/// A region's count prefix exceeded the region's capacity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Stored record count {count} exceeds the maximum of {max}; region treated as corrupt")]
pub struct CorruptCount {
    pub count: usize,
    pub max: usize,
}
