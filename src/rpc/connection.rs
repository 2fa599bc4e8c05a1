//! Lazy connection handle.
//!
//! The facade does not connect at construction; the first call that
//! needs the transport establishes it through the [`Connector`]. The
//! check is double-checked under an `RwLock`: concurrent first calls
//! may both construct a transport, one wins the slot and the loser is
//! dropped — establishing twice wastes one setup, nothing more.

use std::sync::{Arc, RwLock};

use super::{Transport, TransportError};
use crate::observability::{Event, Logger};
use crate::proto::{Request, Response};

/// Establishes a transport on demand.
///
/// Returns `None` when the service cannot be reached right now; the
/// next call will try again.
pub trait Connector: Send + Sync {
    fn connect(&self) -> Option<Arc<dyn Transport>>;
}

/// A connector that never connects. Used where a handle is needed but
/// no service exists, e.g. in degraded deployments and tests.
pub struct NeverConnector;

impl Connector for NeverConnector {
    fn connect(&self) -> Option<Arc<dyn Transport>> {
        None
    }
}

/// Shared, lazily established connection to the service.
pub struct Connection {
    connector: Box<dyn Connector>,
    handle: RwLock<Option<Arc<dyn Transport>>>,
}

impl Connection {
    /// Creates a connection that establishes lazily via `connector`.
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            handle: RwLock::new(None),
        }
    }

    /// Creates a connection over an already-established transport.
    pub fn direct(transport: Arc<dyn Transport>) -> Self {
        Self {
            connector: Box::new(NeverConnector),
            handle: RwLock::new(Some(transport)),
        }
    }

    /// Creates a connection that can never reach a service.
    pub fn unavailable() -> Self {
        Self::new(Box::new(NeverConnector))
    }

    /// Returns the transport, establishing it if necessary.
    fn transport(&self) -> Option<Arc<dyn Transport>> {
        if let Some(transport) = self.handle.read().unwrap().as_ref() {
            return Some(Arc::clone(transport));
        }

        // Construct outside the write lock; a racing caller may do the
        // same, and the first to publish wins.
        let established = self.connector.connect()?;
        let mut slot = self.handle.write().unwrap();
        Some(Arc::clone(slot.get_or_insert(established)))
    }

    /// Issues one call, or fails immediately when the service is
    /// unreachable.
    pub fn call(&self, request: &Request) -> Result<Response, TransportError> {
        match self.transport() {
            Some(transport) => transport.call(request),
            None => {
                Logger::warn(Event::ConnectionUnavailable.as_str(), &[]);
                Err(TransportError::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingConnector {
        attempts: Arc<AtomicUsize>,
        transport: Arc<dyn Transport>,
    }

    impl Connector for CountingConnector {
        fn connect(&self) -> Option<Arc<dyn Transport>> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Some(Arc::clone(&self.transport))
        }
    }

    struct EchoTransport;

    impl Transport for EchoTransport {
        fn call(&self, _request: &Request) -> Result<Response, TransportError> {
            Ok(Response::Features { mask: 0x21 })
        }
    }

    #[test]
    fn test_unavailable_fails_immediately() {
        let connection = Connection::unavailable();
        let result = connection.call(&Request::GetSupportedFeatures);
        assert!(matches!(result, Err(TransportError::Unavailable)));
    }

    #[test]
    fn test_connects_once_then_reuses() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let connection = Connection::new(Box::new(CountingConnector {
            attempts: Arc::clone(&attempts),
            transport: Arc::new(EchoTransport),
        }));

        for _ in 0..3 {
            let response = connection.call(&Request::GetSupportedFeatures).unwrap();
            assert_eq!(response, Response::Features { mask: 0x21 });
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_direct_connection_skips_connector() {
        let connection = Connection::direct(Arc::new(EchoTransport));
        let response = connection.call(&Request::GetSupportedFeatures).unwrap();
        assert_eq!(response, Response::Features { mask: 0x21 });
    }
}
