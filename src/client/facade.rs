//! The typed client.
//!
//! Every operation validates the key locally (1..=64 characters) before
//! issuing a round trip, encodes to the byte contract, and decodes the
//! response. Value length stays the service's authority: the facade
//! forwards byte values unchecked.
//!
//! Integer values travel as 4 fixed bytes, big-endian; strings as
//! UTF-8. A stored value that fails to decode yields `Ok(None)` plus a
//! diagnostic log, never an error — a blob written as bytes and read as
//! a string is the caller's mismatch, not a fault.

use std::sync::Arc;

use super::errors::{ClientError, ClientResult};
use super::lenient::LenientClient;
use crate::observability::{Event, Logger};
use crate::proto::{validate_key, BooleanFeature, Feature, Request, Response};
use crate::rpc::{Connection, Connector, LocalTransport};
use crate::service::StoreService;

/// Typed facade over the persistent store service.
///
/// Construct once and pass by reference; the connection handle is
/// established lazily on first use and shared across calls.
pub struct Client {
    connection: Connection,
}

impl Client {
    /// Creates a client over an existing connection.
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// Creates a client that connects lazily via `connector`.
    pub fn with_connector(connector: Box<dyn Connector>) -> Self {
        Self::new(Connection::new(connector))
    }

    /// Creates a client over a service in the same process.
    pub fn local(service: Arc<StoreService>) -> Self {
        Self::new(Connection::direct(Arc::new(LocalTransport::new(service))))
    }

    /// The degrade-to-default view: every failure becomes the type's
    /// zero value. The only place connection loss is masked.
    pub fn lenient(&self) -> LenientClient<'_> {
        LenientClient::new(self)
    }

    // ----- key/value operations -----

    /// Writes a UTF-8 string. `None` deletes the key.
    pub fn write_string(&self, key: &str, value: Option<&str>) -> ClientResult<bool> {
        self.write_bytes_opt(key, value.map(|v| v.as_bytes().to_vec()))
    }

    /// Writes an integer as 4 fixed bytes, big-endian.
    pub fn write_int(&self, key: &str, value: i32) -> ClientResult<bool> {
        self.write_bytes_opt(key, Some(value.to_be_bytes().to_vec()))
    }

    /// Writes raw bytes. `None` deletes the key. Value length is
    /// validated by the service, not here.
    pub fn write_bytes(&self, key: &str, value: Option<&[u8]>) -> ClientResult<bool> {
        self.write_bytes_opt(key, value.map(|v| v.to_vec()))
    }

    /// Deletes the key. Equivalent to writing an absent value.
    pub fn delete(&self, key: &str) -> ClientResult<bool> {
        self.write_bytes_opt(key, None)
    }

    /// Reads a value and decodes it as UTF-8.
    ///
    /// Returns `Ok(None)` when the key is absent or the stored bytes
    /// are not valid UTF-8 (logged as a decode diagnostic).
    pub fn read_string(&self, key: &str) -> ClientResult<Option<String>> {
        match self.read_bytes(key)? {
            None => Ok(None),
            Some(bytes) => match String::from_utf8(bytes) {
                Ok(s) => Ok(Some(s)),
                Err(e) => {
                    Logger::warn(
                        Event::DecodeFailed.as_str(),
                        &[("key", key), ("expected", "utf-8 string"), ("reason", &e.to_string())],
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Reads a value and decodes it as a big-endian `i32`.
    ///
    /// Returns `Ok(None)` when the key is absent or the stored value is
    /// not exactly 4 bytes (logged as a decode diagnostic).
    pub fn read_int(&self, key: &str) -> ClientResult<Option<i32>> {
        match self.read_bytes(key)? {
            None => Ok(None),
            Some(bytes) => match <[u8; 4]>::try_from(bytes.as_slice()) {
                Ok(raw) => Ok(Some(i32::from_be_bytes(raw))),
                Err(_) => {
                    Logger::warn(
                        Event::DecodeFailed.as_str(),
                        &[
                            ("key", key),
                            ("expected", "4-byte integer"),
                            ("len", &bytes.len().to_string()),
                        ],
                    );
                    Ok(None)
                }
            },
        }
    }

    /// Reads the raw value for a key, or `None` if absent.
    pub fn read_bytes(&self, key: &str) -> ClientResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let response = self.connection.call(&Request::ReadBytes {
            key: key.to_string(),
        })?;
        match response {
            Response::Value { value } => Ok(value),
            Response::Error { kind, message } => Err(ClientError::Remote { kind, message }),
            _ => Err(ClientError::Protocol { call: "ReadBytes" }),
        }
    }

    fn write_bytes_opt(&self, key: &str, value: Option<Vec<u8>>) -> ClientResult<bool> {
        validate_key(key)?;
        let response = self.connection.call(&Request::WriteBytes {
            key: key.to_string(),
            value,
        })?;
        match response {
            Response::Ack { ok } => Ok(ok),
            Response::Error { kind, message } => Err(ClientError::Remote { kind, message }),
            _ => Err(ClientError::Protocol { call: "WriteBytes" }),
        }
    }

    // ----- feature operations -----

    /// Queries the 32-bit supported-feature bitmask.
    pub fn supported_features(&self) -> ClientResult<u32> {
        let response = self.connection.call(&Request::GetSupportedFeatures)?;
        match response {
            Response::Features { mask } => Ok(mask),
            Response::Error { kind, message } => Err(ClientError::Remote { kind, message }),
            _ => Err(ClientError::Protocol {
                call: "GetSupportedFeatures",
            }),
        }
    }

    /// Whether the service supports a feature.
    pub fn is_supported(&self, feature: Feature) -> ClientResult<bool> {
        let mask = self.supported_features()?;
        Ok(mask & feature.bit() == feature.bit())
    }

    /// Whether the service supports the feature with this canonical
    /// name. Unknown names are simply unsupported.
    pub fn is_supported_by_name(&self, name: &str) -> ClientResult<bool> {
        match Feature::from_name(name) {
            Some(feature) => self.is_supported(feature),
            None => Ok(false),
        }
    }

    /// Reads the state of a boolean-capable feature.
    pub fn get(&self, feature: BooleanFeature) -> ClientResult<bool> {
        let response = self.connection.call(&Request::GetBooleanFeature {
            feature: feature.bit(),
        })?;
        match response {
            Response::Flag { enabled } => Ok(enabled),
            Response::Error { kind, message } => Err(ClientError::Remote { kind, message }),
            _ => Err(ClientError::Protocol {
                call: "GetBooleanFeature",
            }),
        }
    }

    /// Enables or disables a boolean-capable feature.
    pub fn set(&self, feature: BooleanFeature, enable: bool) -> ClientResult<bool> {
        let response = self.connection.call(&Request::SetBooleanFeature {
            feature: feature.bit(),
            enable,
        })?;
        match response {
            Response::Ack { ok } => Ok(ok),
            Response::Error { kind, message } => Err(ClientError::Remote { kind, message }),
            _ => Err(ClientError::Protocol {
                call: "SetBooleanFeature",
            }),
        }
    }
}
