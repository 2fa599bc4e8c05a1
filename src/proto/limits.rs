//! Size limits for keys and values, and the validation helpers that
//! enforce them.
//!
//! The same checks run on both sides of the wire: the client facade
//! fails fast before issuing a round trip, and the service remains the
//! final authority.

use thiserror::Error;

/// Maximum key length, in characters.
pub const MAX_KEY_LEN: usize = 64;

/// Maximum value length, in bytes.
pub const MAX_VALUE_LEN: usize = 4096;

/// Minimum value length, in bytes. A zero-length value is never
/// stored; absence is expressed by deletion.
pub const MIN_VALUE_LEN: usize = 1;

/// Validation errors for the shared contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtoError {
    /// Key empty or longer than [`MAX_KEY_LEN`] characters.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    /// Value longer than [`MAX_VALUE_LEN`] bytes.
    #[error("value too large: {len} bytes (limit {limit})", limit = MAX_VALUE_LEN)]
    ValueTooLarge { len: usize },

    /// Zero-length value; delete the key instead.
    #[error("value must not be empty (delete the key instead)")]
    ValueEmpty,

    /// Feature id outside the boolean-capable allow-list.
    #[error("feature {0:#x} is not boolean-capable")]
    UnsupportedFeature(u32),
}

/// Checks that a key is 1..=64 characters.
pub fn validate_key(key: &str) -> Result<(), ProtoError> {
    if key.is_empty() {
        return Err(ProtoError::InvalidKey {
            reason: "key must not be empty".to_string(),
        });
    }
    let len = key.chars().count();
    if len > MAX_KEY_LEN {
        return Err(ProtoError::InvalidKey {
            reason: format!("key is {} characters (limit {})", len, MAX_KEY_LEN),
        });
    }
    Ok(())
}

/// Checks that a value is 1..=4096 bytes.
pub fn validate_value(value: &[u8]) -> Result<(), ProtoError> {
    if value.is_empty() {
        return Err(ProtoError::ValueEmpty);
    }
    if value.len() > MAX_VALUE_LEN {
        return Err(ProtoError::ValueTooLarge { len: value.len() });
    }
    Ok(())
}
