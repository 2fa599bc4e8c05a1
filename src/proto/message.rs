//! Request and response messages of the generic byte contract.
//!
//! The contract is transport-agnostic: these types serialize with serde
//! and can travel over any reliable request/response channel. Service
//! failures are carried as a distinct [`Response::Error`] variant so
//! callers can tell a remote fault from a legitimately absent value.

use serde::{Deserialize, Serialize};

use super::limits::ProtoError;

/// A request to the persistent store service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// Query the 32-bit capability mask.
    GetSupportedFeatures,
    /// Read the current state of a boolean-capable feature.
    GetBooleanFeature { feature: u32 },
    /// Enable or disable a boolean-capable feature.
    SetBooleanFeature { feature: u32, enable: bool },
    /// Write a value, or delete the key when `value` is absent.
    WriteBytes { key: String, value: Option<Vec<u8>> },
    /// Read the current value of a key.
    ReadBytes { key: String },
}

/// A response from the persistent store service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// Capability mask for `GetSupportedFeatures`.
    Features { mask: u32 },
    /// Feature state for `GetBooleanFeature`.
    Flag { enabled: bool },
    /// Success indicator for `SetBooleanFeature` and `WriteBytes`.
    Ack { ok: bool },
    /// Value (or not-found) for `ReadBytes`.
    Value { value: Option<Vec<u8>> },
    /// The request failed on the service side.
    Error { kind: ErrorKind, message: String },
}

/// Failure categories carried over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Key empty or over the length limit.
    InvalidKey,
    /// Value over the size limit.
    ValueTooLarge,
    /// Zero-length value.
    ValueEmpty,
    /// Feature id outside the boolean-capable allow-list.
    UnsupportedFeature,
    /// Storage-side I/O or corruption failure.
    Storage,
}

impl ProtoError {
    /// The wire category for this validation failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProtoError::InvalidKey { .. } => ErrorKind::InvalidKey,
            ProtoError::ValueTooLarge { .. } => ErrorKind::ValueTooLarge,
            ProtoError::ValueEmpty => ErrorKind::ValueEmpty,
            ProtoError::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
        }
    }
}

impl Response {
    /// Builds an error response from a validation failure.
    pub fn from_proto_error(err: &ProtoError) -> Response {
        Response::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serde_round_trip() {
        let requests = vec![
            Request::GetSupportedFeatures,
            Request::GetBooleanFeature { feature: 0x200 },
            Request::SetBooleanFeature {
                feature: 0x20,
                enable: true,
            },
            Request::WriteBytes {
                key: "boot.count".to_string(),
                value: Some(vec![0, 0, 0, 7]),
            },
            Request::WriteBytes {
                key: "boot.count".to_string(),
                value: None,
            },
            Request::ReadBytes {
                key: "boot.count".to_string(),
            },
        ];

        for request in requests {
            let encoded = serde_json::to_string(&request).unwrap();
            let decoded: Request = serde_json::from_str(&encoded).unwrap();
            assert_eq!(request, decoded);
        }
    }

    #[test]
    fn test_error_response_carries_kind() {
        let err = ProtoError::ValueTooLarge { len: 5000 };
        let response = Response::from_proto_error(&err);
        match response {
            Response::Error { kind, message } => {
                assert_eq!(kind, ErrorKind::ValueTooLarge);
                assert!(message.contains("5000"));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_not_found_is_absent_value() {
        let response = Response::Value { value: None };
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: Response = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, Response::Value { value: None });
    }
}
