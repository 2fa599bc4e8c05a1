//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by the command-line interface.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("persist directory already initialized: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("feature {0} is not boolean-capable")]
    NotBoolean(String),
}
