//! Persistent store engine.
//!
//! The engine owns the durable key/value namespace: an append-only,
//! checksummed record log replayed into an in-memory index on open.
//!
//! # Design principles
//!
//! - Append-only log, fsync before acknowledgement
//! - Checksum verified on every record read
//! - Latest record wins for the same key; tombstones delete
//! - Halt on corruption, no silent repair
//! - Backing directory sits outside anything a factory reset wipes

mod checksum;
mod engine;
mod errors;
mod log;
mod record;

pub use checksum::{checksum, verify};
pub use engine::PersistentStore;
pub use errors::{StoreError, StoreResult};
pub use log::{LogReader, LogWriter, LOG_FILE};
pub use record::EntryRecord;
