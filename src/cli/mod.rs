//! Command-line interface.
//!
//! Operates on a local store through the real client/service path:
//! - init: create the persist directory and an empty entry log
//! - put/get/delete and put-int/get-int: key/value operations
//! - features, get-feature, set-feature: capability surface
//! - compact: rewrite the entry log with live entries only

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
