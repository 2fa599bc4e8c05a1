//! Client error types.

use thiserror::Error;

use crate::proto::{ErrorKind, ProtoError};
use crate::rpc::TransportError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the client facade.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Key empty or over the length limit; caught before any round trip.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    /// Feature id outside the boolean-capable allow-list; caught
    /// locally.
    #[error("feature {0:#x} is not boolean-capable")]
    UnsupportedFeature(u32),

    /// The service cannot be reached. Distinct from "not found" by
    /// design; callers that want the historical masking use the lenient
    /// view.
    #[error("service unavailable")]
    Unavailable,

    /// The service reported a failure.
    #[error("remote failure ({kind:?}): {message}")]
    Remote { kind: ErrorKind, message: String },

    /// The service answered with a response that does not match the
    /// call.
    #[error("unexpected response for {call}")]
    Protocol { call: &'static str },
}

impl From<ProtoError> for ClientError {
    fn from(err: ProtoError) -> Self {
        match err {
            ProtoError::InvalidKey { reason } => ClientError::InvalidKey { reason },
            ProtoError::UnsupportedFeature(bit) => ClientError::UnsupportedFeature(bit),
            other => ClientError::Remote {
                kind: other.kind(),
                message: other.to_string(),
            },
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        // Channel failure of any shape means the service is not
        // reachable for this call.
        match err {
            TransportError::Unavailable
            | TransportError::Io(_)
            | TransportError::Codec(_) => ClientError::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_collapse_to_unavailable() {
        let from_io: ClientError =
            TransportError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
                .into();
        assert!(matches!(from_io, ClientError::Unavailable));

        let from_codec: ClientError = TransportError::Codec("bad frame".to_string()).into();
        assert!(matches!(from_codec, ClientError::Unavailable));
    }

    #[test]
    fn test_proto_validation_maps_locally() {
        let err: ClientError = ProtoError::InvalidKey {
            reason: "empty".to_string(),
        }
        .into();
        assert!(matches!(err, ClientError::InvalidKey { .. }));

        let err: ClientError = ProtoError::UnsupportedFeature(0x4).into();
        assert!(matches!(err, ClientError::UnsupportedFeature(0x4)));
    }
}
