//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// everkv - a bounded, factory-reset-durable key/value store
#[derive(Parser, Debug)]
#[command(name = "everkv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./everkv.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the persist directory
    Init,

    /// Write a string value
    Put {
        key: String,
        value: String,
    },

    /// Read a value as a string
    Get {
        key: String,
    },

    /// Write a 32-bit integer value
    PutInt {
        key: String,
        value: i32,
    },

    /// Read a value as a 32-bit integer
    GetInt {
        key: String,
    },

    /// Delete a key
    Delete {
        key: String,
    },

    /// List supported features
    Features,

    /// Read the state of a boolean-capable feature
    GetFeature {
        /// Canonical feature name, e.g. FEATURE_TAP_TO_WAKE
        name: String,
    },

    /// Enable or disable a boolean-capable feature
    SetFeature {
        /// Canonical feature name, e.g. FEATURE_TAP_TO_WAKE
        name: String,
        /// true to enable, false to disable
        enable: bool,
    },

    /// Rewrite the entry log with live entries only
    Compact,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
