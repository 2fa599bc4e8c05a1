//! CRC32 checksums for log records.
//!
//! Every record carries a checksum over its full contents; every read
//! verifies it. A mismatch is corruption and aborts the operation.

use crc32fast::Hasher;

/// Computes a CRC32 (IEEE) checksum over the data.
pub fn checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Verifies a checksum against the expected value.
pub fn verify(data: &[u8], expected: u32) -> bool {
    checksum(data) == expected
}
