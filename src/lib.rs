//! everkv - a bounded, factory-reset-durable key/value store with a
//! typed client facade over a transport-agnostic RPC contract.

pub mod cli;
pub mod client;
pub mod config;
pub mod observability;
pub mod proto;
pub mod rpc;
pub mod service;
pub mod store;
