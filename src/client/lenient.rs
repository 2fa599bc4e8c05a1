//! The degrade-to-default view.
//!
//! The platform this contract descends from swallowed every remote
//! failure into the type's zero value, so callers could not tell
//! "service down" from "legitimately absent". The typed facade fixes
//! that; this view reproduces the historical behavior for callers that
//! want graceful degradation, and it is the only place in the crate
//! where that masking happens. Every swallowed failure is WARN-logged.

use super::facade::Client;
use crate::observability::{Event, Logger};
use crate::proto::{BooleanFeature, Feature};

/// A view of [`Client`] whose operations never fail: any error becomes
/// the type's zero value (`0`, `false`, `None`).
pub struct LenientClient<'a> {
    client: &'a Client,
}

impl<'a> LenientClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn default_on_error<T>(operation: &str, result: Result<T, super::ClientError>, default: T) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                Logger::warn(
                    Event::DefaultApplied.as_str(),
                    &[("operation", operation), ("reason", &err.to_string())],
                );
                default
            }
        }
    }

    /// Writes a string; `false` on any failure.
    pub fn write_string(&self, key: &str, value: Option<&str>) -> bool {
        Self::default_on_error("write_string", self.client.write_string(key, value), false)
    }

    /// Writes an integer; `false` on any failure.
    pub fn write_int(&self, key: &str, value: i32) -> bool {
        Self::default_on_error("write_int", self.client.write_int(key, value), false)
    }

    /// Writes bytes; `false` on any failure.
    pub fn write_bytes(&self, key: &str, value: Option<&[u8]>) -> bool {
        Self::default_on_error("write_bytes", self.client.write_bytes(key, value), false)
    }

    /// Deletes a key; `false` on any failure.
    pub fn delete(&self, key: &str) -> bool {
        Self::default_on_error("delete", self.client.delete(key), false)
    }

    /// Reads a string; `None` on any failure.
    pub fn read_string(&self, key: &str) -> Option<String> {
        Self::default_on_error("read_string", self.client.read_string(key), None)
    }

    /// Reads an integer; `0` when absent or on any failure.
    pub fn read_int(&self, key: &str) -> i32 {
        Self::default_on_error(
            "read_int",
            self.client.read_int(key).map(|v| v.unwrap_or(0)),
            0,
        )
    }

    /// Reads bytes; `None` on any failure.
    pub fn read_bytes(&self, key: &str) -> Option<Vec<u8>> {
        Self::default_on_error("read_bytes", self.client.read_bytes(key), None)
    }

    /// The supported-feature mask; `0` on any failure.
    pub fn supported_features(&self) -> u32 {
        Self::default_on_error("supported_features", self.client.supported_features(), 0)
    }

    /// Whether a feature is supported; `false` on any failure.
    pub fn is_supported(&self, feature: Feature) -> bool {
        Self::default_on_error("is_supported", self.client.is_supported(feature), false)
    }

    /// State of a boolean-capable feature; `false` on any failure.
    pub fn get(&self, feature: BooleanFeature) -> bool {
        Self::default_on_error("get", self.client.get(feature), false)
    }

    /// Sets a boolean-capable feature; `false` on any failure.
    pub fn set(&self, feature: BooleanFeature, enable: bool) -> bool {
        Self::default_on_error("set", self.client.set(feature, enable), false)
    }
}
