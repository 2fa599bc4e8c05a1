//! Shared wire contract for the persistent store service.
//!
//! Both the client facade and the service validate against the same
//! limits and speak the same request/response messages, so the
//! definitions live in one place.

mod features;
mod limits;
mod message;

pub use features::{mask_of, BooleanFeature, Feature};
pub use limits::{
    validate_key, validate_value, ProtoError, MAX_KEY_LEN, MAX_VALUE_LEN, MIN_VALUE_LEN,
};
pub use message::{ErrorKind, Request, Response};
