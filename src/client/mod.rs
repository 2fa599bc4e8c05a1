//! Client facade.
//!
//! Typed convenience operations over the generic byte contract: string,
//! integer, and raw byte read/write/delete, plus the feature capability
//! calls. Keys are validated locally before any round trip; connection
//! loss is a distinct error variant rather than a silent default. The
//! one sanctioned degrade-to-default boundary is [`Client::lenient`].

mod errors;
mod facade;
mod lenient;

pub use errors::{ClientError, ClientResult};
pub use facade::Client;
pub use lenient::LenientClient;
