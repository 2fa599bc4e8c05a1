//! Store error types.

use std::io;

use thiserror::Error;

use crate::proto::ProtoError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the persistent store engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key empty or over the length limit.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    /// Value over the size limit.
    #[error("value too large: {len} bytes (limit {limit})")]
    ValueTooLarge { len: usize, limit: usize },

    /// Zero-length value; absence is expressed by deletion.
    #[error("value must not be empty (delete the key instead)")]
    ValueEmpty,

    /// Disk I/O failure.
    #[error("storage I/O failure: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Checksum mismatch, truncation, or an impossible record length.
    /// The store refuses to open over a corrupt log.
    #[error("data corruption at offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },
}

impl StoreError {
    /// Creates an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a corruption error at a byte offset.
    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Whether this error means the log itself cannot be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}

impl From<ProtoError> for StoreError {
    fn from(err: ProtoError) -> Self {
        match err {
            ProtoError::InvalidKey { reason } => StoreError::InvalidKey { reason },
            ProtoError::ValueTooLarge { len } => StoreError::ValueTooLarge {
                len,
                limit: crate::proto::MAX_VALUE_LEN,
            },
            ProtoError::ValueEmpty => StoreError::ValueEmpty,
            // Feature requests never reach the store.
            ProtoError::UnsupportedFeature(bit) => StoreError::InvalidKey {
                reason: format!("unexpected feature id {:#x}", bit),
            },
        }
    }
}
