//! The persistent store engine.
//!
//! An append-only entry log replayed into an in-memory index on open.
//! Appends are serialized by a single log mutex (writes to the same key
//! are linearizable, last acknowledged write wins); reads go through an
//! `RwLock` index and never wait on the log file.
//!
//! A write is acknowledged only after the record is fsynced and
//! published to the index, so every acknowledged write is visible to
//! subsequent reads and survives a process restart.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::config::StoreConfig;
use crate::observability::{Event, Logger};
use crate::proto::{validate_key, validate_value};

use super::errors::StoreResult;
use super::log::{LogReader, LogWriter, LOG_FILE};
use super::record::EntryRecord;
use super::StoreError;

struct LogState {
    writer: LogWriter,
    /// Total records in the log, live and dead.
    records: u64,
}

/// Authoritative, durable key/value store.
///
/// Keys are 1..=64 characters, values 1..=4096 bytes. Writing `None`
/// deletes; a zero-length value is never stored.
pub struct PersistentStore {
    log_path: PathBuf,
    log: Mutex<LogState>,
    index: RwLock<HashMap<String, Vec<u8>>>,
}

impl PersistentStore {
    /// Opens the store rooted at the configured persist directory,
    /// replaying the entry log.
    ///
    /// Any corruption in the log (checksum mismatch, truncation,
    /// impossible record length) refuses the open; there is no silent
    /// repair.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let log_path = config.persist_dir.join(LOG_FILE);

        let mut index = HashMap::new();
        let mut records = 0u64;
        if let Some(mut reader) = LogReader::open(&log_path)? {
            while let Some(record) = reader.read_next()? {
                records += 1;
                if record.is_tombstone {
                    index.remove(&record.key);
                } else {
                    index.insert(record.key, record.value);
                }
            }
        }

        let writer = LogWriter::open(&log_path)?;
        let live = index.len() as u64;

        let store = Self {
            log_path,
            log: Mutex::new(LogState { writer, records }),
            index: RwLock::new(index),
        };

        let dead = records - live;
        if config.auto_compact && dead > live && dead >= config.compact_dead_min {
            store.compact()?;
        }

        Logger::info(
            Event::StoreOpen.as_str(),
            &[
                ("entries", &live.to_string()),
                ("path", &store.log_path.display().to_string()),
            ],
        );

        Ok(store)
    }

    /// Returns the entry log path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Writes a value for a key, or deletes the key when `value` is
    /// `None`. Deleting an absent key succeeds without touching the log.
    ///
    /// Returns only after the mutation is durable and visible to
    /// readers.
    pub fn write(&self, key: &str, value: Option<&[u8]>) -> StoreResult<bool> {
        validate_key(key)?;

        match value {
            Some(v) => {
                validate_value(v)?;
                let record = EntryRecord::live(key, v.to_vec());

                let mut log = self.log.lock().unwrap();
                log.writer.append(&record)?;
                log.records += 1;
                self.index
                    .write()
                    .unwrap()
                    .insert(key.to_string(), v.to_vec());
                Ok(true)
            }
            None => {
                let mut log = self.log.lock().unwrap();
                // Checked under the log lock so a concurrent write and
                // delete of the same key serialize.
                if !self.index.read().unwrap().contains_key(key) {
                    return Ok(true);
                }
                log.writer.append(&EntryRecord::tombstone(key))?;
                log.records += 1;
                self.index.write().unwrap().remove(key);
                Ok(true)
            }
        }
    }

    /// Reads the current value for a key, or `None` if no entry exists.
    ///
    /// Served from the index; never observes a partially applied write.
    pub fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.index.read().unwrap().get(key).cloned())
    }

    /// Whether an entry exists for the key.
    pub fn contains(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.index.read().unwrap().contains_key(key))
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.index.read().unwrap().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.read().unwrap().is_empty()
    }

    /// Rewrites the log with only live entries, bounding its size.
    ///
    /// The rewrite goes to a temporary file which is fsynced and then
    /// atomically renamed over the log; a crash mid-compaction leaves
    /// either the old log or the new one, never a mix.
    pub fn compact(&self) -> StoreResult<()> {
        let mut log = self.log.lock().unwrap();
        let index = self.index.read().unwrap();

        let tmp_path = self.log_path.with_extension("dat.compact");
        {
            let mut file = File::create(&tmp_path).map_err(|e| {
                StoreError::io(
                    format!("failed to create compaction file: {}", tmp_path.display()),
                    e,
                )
            })?;

            // Deterministic output: entries in key order.
            let mut entries: Vec<_> = index.iter().collect();
            entries.sort_by_key(|(key, _)| key.as_str());

            for (key, value) in entries {
                let record = EntryRecord::live(key.clone(), value.clone());
                file.write_all(&record.serialize()).map_err(|e| {
                    StoreError::io(format!("failed to write compacted key: {}", key), e)
                })?;
            }

            file.sync_all()
                .map_err(|e| StoreError::io("fsync failed on compaction file", e))?;
        }

        fs::rename(&tmp_path, &self.log_path).map_err(|e| {
            StoreError::io(
                format!("failed to swap compacted log: {}", self.log_path.display()),
                e,
            )
        })?;

        let dropped = log.records - index.len() as u64;
        log.writer = LogWriter::open(&self.log_path)?;
        log.records = index.len() as u64;

        Logger::info(
            Event::StoreCompact.as_str(),
            &[
                ("entries", &index.len().to_string()),
                ("dropped_records", &dropped.to_string()),
            ],
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> PersistentStore {
        PersistentStore::open(&StoreConfig::at(dir.path().join("persist"))).unwrap()
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.write("serial", Some(b"ABC123")).unwrap();
        assert_eq!(store.read("serial").unwrap(), Some(b"ABC123".to_vec()));
    }

    #[test]
    fn test_overwrite_replaces() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.write("k", Some(b"first")).unwrap();
        store.write("k", Some(b"second")).unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_none_deletes() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.write("k", Some(b"value")).unwrap();
        assert!(store.write("k", None).unwrap());
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_delete_absent_key_succeeds() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert!(store.write("missing", None).unwrap());
        // No record appended for the no-op.
        assert_eq!(store.log.lock().unwrap().records, 0);
    }

    #[test]
    fn test_limits_enforced() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let long_key = "k".repeat(65);
        assert!(matches!(
            store.write(&long_key, Some(b"v")),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(matches!(
            store.write("k", Some(&vec![0u8; 4097])),
            Err(StoreError::ValueTooLarge { .. })
        ));
        assert!(matches!(
            store.write("k", Some(&[])),
            Err(StoreError::ValueEmpty)
        ));
        assert!(matches!(
            store.read(""),
            Err(StoreError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_reopen_preserves_entries() {
        let dir = TempDir::new().unwrap();

        {
            let store = open_store(&dir);
            store.write("a", Some(b"1")).unwrap();
            store.write("b", Some(b"2")).unwrap();
            store.write("a", None).unwrap();
        }

        let store = open_store(&dir);
        assert_eq!(store.read("a").unwrap(), None);
        assert_eq!(store.read("b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_compact_drops_dead_records() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        for i in 0..50 {
            store.write("churn", Some(format!("v{}", i).as_bytes())).unwrap();
        }
        store.write("keep", Some(b"stays")).unwrap();

        let before = fs::metadata(store.log_path()).unwrap().len();
        store.compact().unwrap();
        let after = fs::metadata(store.log_path()).unwrap().len();

        assert!(after < before);
        assert_eq!(store.read("churn").unwrap(), Some(b"v49".to_vec()));
        assert_eq!(store.read("keep").unwrap(), Some(b"stays".to_vec()));
    }

    #[test]
    fn test_writes_after_compact_persist() {
        let dir = TempDir::new().unwrap();

        {
            let store = open_store(&dir);
            store.write("a", Some(b"1")).unwrap();
            store.compact().unwrap();
            store.write("b", Some(b"2")).unwrap();
        }

        let store = open_store(&dir);
        assert_eq!(store.read("a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.read("b").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_corrupt_log_refuses_open() {
        let dir = TempDir::new().unwrap();
        let log_path = {
            let store = open_store(&dir);
            store.write("k", Some(b"value")).unwrap();
            store.log_path().to_path_buf()
        };

        let mut contents = fs::read(&log_path).unwrap();
        let mid = contents.len() / 2;
        contents[mid] ^= 0xFF;
        fs::write(&log_path, contents).unwrap();

        let result = PersistentStore::open(&StoreConfig::at(dir.path().join("persist")));
        assert!(matches!(result, Err(ref e) if e.is_corruption()));
    }
}
