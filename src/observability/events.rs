//! Lifecycle event names.
//!
//! Each loggable lifecycle point has one stable event name so log
//! consumers can filter on exact strings.

use std::fmt;

/// Lifecycle events emitted by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Store opened and the entry log replayed.
    StoreOpen,
    /// Entry log rewritten with live entries only.
    StoreCompact,
    /// A write was rejected by validation.
    WriteRejected,
    /// A storage-side I/O or corruption failure.
    StorageError,
    /// A feature call used an id outside the boolean allow-list.
    FeatureRejected,
    /// The client could not reach the service.
    ConnectionUnavailable,
    /// A stored value failed to decode to the requested type.
    DecodeFailed,
    /// A lenient-view call swallowed a failure into a default.
    DefaultApplied,
}

impl Event {
    /// Returns the stable event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreOpen => "STORE_OPEN",
            Event::StoreCompact => "STORE_COMPACT",
            Event::WriteRejected => "WRITE_REJECTED",
            Event::StorageError => "STORAGE_ERROR",
            Event::FeatureRejected => "FEATURE_REJECTED",
            Event::ConnectionUnavailable => "CONNECTION_UNAVAILABLE",
            Event::DecodeFailed => "DECODE_FAILED",
            Event::DefaultApplied => "DEFAULT_APPLIED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
