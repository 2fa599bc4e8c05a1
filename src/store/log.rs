//! Append-only entry log: writer and reader.
//!
//! The writer appends one serialized record per mutation and fsyncs
//! before returning; a write is never acknowledged until it is durable.
//! The reader replays the log sequentially, verifying every checksum,
//! and halts on the first sign of corruption.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::{EntryRecord, MIN_RECORD_SIZE};

/// File name of the entry log inside the persist directory.
pub const LOG_FILE: &str = "entries.dat";

/// Append-only log writer with fsync on every append.
pub struct LogWriter {
    path: PathBuf,
    file: File,
    offset: u64,
}

impl LogWriter {
    /// Opens or creates the entry log at `path`, creating parent
    /// directories as needed.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(
                    format!("failed to create persist directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                StoreError::io(format!("failed to open entry log: {}", path.display()), e)
            })?;

        let offset = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read entry log metadata", e))?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            offset,
        })
    }

    /// Appends a record and fsyncs. Returns the offset the record was
    /// written at.
    pub fn append(&mut self, record: &EntryRecord) -> StoreResult<u64> {
        let serialized = record.serialize();
        let offset = self.offset;

        self.file.write_all(&serialized).map_err(|e| {
            StoreError::io(format!("failed to append record for key: {}", record.key), e)
        })?;

        // fsync before acknowledgement; durability is the contract.
        self.file.sync_all().map_err(|e| {
            StoreError::io(format!("fsync failed after appending key: {}", record.key), e)
        })?;

        self.offset += serialized.len() as u64;
        Ok(offset)
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current end-of-log offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Sequential log reader with strict corruption detection.
pub struct LogReader {
    file: File,
    offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the entry log for replay. A missing log is not an error;
    /// it reads as empty.
    pub fn open(path: &Path) -> StoreResult<Option<Self>> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::io(
                    format!("failed to open entry log: {}", path.display()),
                    e,
                ))
            }
        };

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read entry log metadata", e))?
            .len();

        Ok(Some(Self {
            file,
            offset: 0,
            file_size,
        }))
    }

    /// Returns the current read offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads the next record, or `None` at end of log.
    ///
    /// Any checksum mismatch, truncation, or impossible length is
    /// corruption and aborts the replay.
    pub fn read_next(&mut self) -> StoreResult<Option<EntryRecord>> {
        if self.offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.offset,
                format!(
                    "truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.file.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(self.offset, format!("failed to read record length: {}", e))
        })?;
        let record_len = u32::from_le_bytes(len_buf) as u64;

        if record_len < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.offset,
                format!("invalid record length: {}", record_len),
            ));
        }
        if record_len > remaining {
            return Err(StoreError::corruption(
                self.offset,
                format!(
                    "record length {} exceeds remaining log size {}",
                    record_len, remaining
                ),
            ));
        }

        let mut buf = Vec::with_capacity(record_len as usize);
        buf.extend_from_slice(&len_buf);
        buf.resize(record_len as usize, 0);
        self.file.read_exact(&mut buf[4..]).map_err(|e| {
            StoreError::corruption(self.offset, format!("failed to read record body: {}", e))
        })?;

        let (record, consumed) = EntryRecord::deserialize(&buf)
            .map_err(|e| StoreError::corruption(self.offset, e.to_string()))?;

        self.offset += consumed as u64;
        Ok(Some(record))
    }
}
