//! On-disk record format for the entry log.
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, total including this field)
//! +------------------+
//! | Key              | (u16 LE length prefix + UTF-8 bytes)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Value            | (u16 LE length prefix + bytes, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over everything above)
//! +------------------+
//! ```
//!
//! Keys are at most 64 characters and values at most 4096 bytes, so the
//! u16 length prefixes cannot overflow.

use std::io::{self, Read};

use super::checksum::checksum;

/// Smallest possible serialized record: length + key prefix + one key
/// byte + tombstone + value prefix + checksum.
pub const MIN_RECORD_SIZE: usize = 4 + 2 + 1 + 1 + 2 + 4;

/// One entry-log record: a live value for a key, or a tombstone
/// marking its deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// The entry's key.
    pub key: String,
    /// Whether this record deletes the key.
    pub is_tombstone: bool,
    /// The value bytes (empty for tombstones).
    pub value: Vec<u8>,
}

impl EntryRecord {
    /// Creates a live record.
    pub fn live(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            is_tombstone: false,
            value,
        }
    }

    /// Creates a tombstone record.
    pub fn tombstone(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_tombstone: true,
            value: Vec::new(),
        }
    }

    /// Serializes the complete record, checksum included.
    pub fn serialize(&self) -> Vec<u8> {
        let key_bytes = self.key.as_bytes();
        let body_len = 2 + key_bytes.len() + 1 + 2 + self.value.len();
        let record_len = (4 + body_len + 4) as u32;

        let mut buf = Vec::with_capacity(record_len as usize);
        buf.extend_from_slice(&record_len.to_le_bytes());
        buf.extend_from_slice(&(key_bytes.len() as u16).to_le_bytes());
        buf.extend_from_slice(key_bytes);
        buf.push(if self.is_tombstone { 1 } else { 0 });
        buf.extend_from_slice(&(self.value.len() as u16).to_le_bytes());
        buf.extend_from_slice(&self.value);

        let sum = checksum(&buf);
        buf.extend_from_slice(&sum.to_le_bytes());
        buf
    }

    /// Deserializes one record from the front of `data`, verifying the
    /// checksum. Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "record too short",
            ));
        }

        let record_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if record_len < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid record length: {}", record_len),
            ));
        }
        if data.len() < record_len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record truncated: expected {} bytes, got {}",
                    record_len,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_len - 4;
        let stored = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed = checksum(&data[..checksum_offset]);
        if computed != stored {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed, stored
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let mut key_len_buf = [0u8; 2];
        cursor.read_exact(&mut key_len_buf)?;
        let key_len = u16::from_le_bytes(key_len_buf) as usize;
        let mut key_buf = vec![0u8; key_len];
        cursor.read_exact(&mut key_buf)?;
        let key = String::from_utf8(key_buf).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("key not UTF-8: {}", e))
        })?;

        let mut flag_buf = [0u8; 1];
        cursor.read_exact(&mut flag_buf)?;
        let is_tombstone = flag_buf[0] != 0;

        let mut value_len_buf = [0u8; 2];
        cursor.read_exact(&mut value_len_buf)?;
        let value_len = u16::from_le_bytes(value_len_buf) as usize;
        let mut value = vec![0u8; value_len];
        cursor.read_exact(&mut value)?;

        Ok((
            Self {
                key,
                is_tombstone,
                value,
            },
            record_len,
        ))
    }
}
