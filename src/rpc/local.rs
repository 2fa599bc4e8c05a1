//! In-process transport.
//!
//! Dispatches requests straight into a shared [`StoreService`]. This is
//! the deployment the CLI and the test suites use; a socket-based
//! channel would carry the same messages through the frame codec.

use std::sync::Arc;

use super::{Transport, TransportError};
use crate::proto::{Request, Response};
use crate::service::StoreService;

/// Transport that calls a service living in the same process.
pub struct LocalTransport {
    service: Arc<StoreService>,
}

impl LocalTransport {
    /// Wraps a shared service.
    pub fn new(service: Arc<StoreService>) -> Self {
        Self { service }
    }
}

impl Transport for LocalTransport {
    fn call(&self, request: &Request) -> Result<Response, TransportError> {
        Ok(self.service.handle(request))
    }
}
