//! Observability for everkv.
//!
//! Structured one-line JSON logging with deterministic field ordering.
//! Logging is synchronous, unbuffered, and read-only: it never affects
//! the outcome of the operation being logged.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
