//! Transport-agnostic RPC plumbing.
//!
//! The client facade speaks to the service through the [`Transport`]
//! trait: one synchronous, blocking request/response call. An
//! unreachable service fails immediately; there is no retry, queueing,
//! or timeout machinery at this layer.

mod codec;
mod connection;
mod local;

pub use codec::{read_frame, write_frame, MAX_FRAME_LEN};
pub use connection::{Connection, Connector, NeverConnector};
pub use local::LocalTransport;

use thiserror::Error;

use crate::proto::{Request, Response};

/// Errors raised by the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service is not reachable.
    #[error("service unavailable")]
    Unavailable,

    /// The channel failed mid-call.
    #[error("channel I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A frame could not be encoded or decoded.
    #[error("frame codec failure: {0}")]
    Codec(String),
}

/// A synchronous request/response channel to the service.
///
/// Implementations must be shareable across threads; concurrent calls
/// are independent.
pub trait Transport: Send + Sync {
    /// Issues one call and blocks until the response arrives or the
    /// channel reports failure.
    fn call(&self, request: &Request) -> Result<Response, TransportError>;
}
