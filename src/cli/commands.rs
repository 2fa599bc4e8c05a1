//! Command dispatch.

use std::sync::Arc;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use crate::client::Client;
use crate::config::Config;
use crate::proto::{BooleanFeature, Feature};
use crate::service::StoreService;
use crate::store::{PersistentStore, LOG_FILE};

/// Parses arguments, loads configuration, and runs the command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Init => init(&config),
        Command::Put { key, value } => {
            let client = open_client(&config)?;
            client.write_string(&key, Some(&value))?;
            println!("ok");
            Ok(())
        }
        Command::Get { key } => {
            let client = open_client(&config)?;
            match client.read_string(&key)? {
                Some(value) => println!("{}", value),
                None => println!("(not found)"),
            }
            Ok(())
        }
        Command::PutInt { key, value } => {
            let client = open_client(&config)?;
            client.write_int(&key, value)?;
            println!("ok");
            Ok(())
        }
        Command::GetInt { key } => {
            let client = open_client(&config)?;
            match client.read_int(&key)? {
                Some(value) => println!("{}", value),
                None => println!("(not found)"),
            }
            Ok(())
        }
        Command::Delete { key } => {
            let client = open_client(&config)?;
            client.delete(&key)?;
            println!("ok");
            Ok(())
        }
        Command::Features => {
            let client = open_client(&config)?;
            let mask = client.supported_features()?;
            println!("mask: {:#x}", mask);
            for feature in Feature::ALL {
                let supported = mask & feature.bit() == feature.bit();
                println!(
                    "{} ({:#x}): {}",
                    feature.name(),
                    feature.bit(),
                    if supported { "supported" } else { "unsupported" }
                );
            }
            Ok(())
        }
        Command::GetFeature { name } => {
            let feature = boolean_feature(&name)?;
            let client = open_client(&config)?;
            println!("{}", client.get(feature)?);
            Ok(())
        }
        Command::SetFeature { name, enable } => {
            let feature = boolean_feature(&name)?;
            let client = open_client(&config)?;
            let ok = client.set(feature, enable)?;
            println!("{}", if ok { "ok" } else { "rejected" });
            Ok(())
        }
        Command::Compact => {
            let store = PersistentStore::open(&config.store)?;
            store.compact()?;
            println!("compacted: {} entries", store.len());
            Ok(())
        }
    }
}

/// Creates the persist directory and an empty entry log.
pub fn init(config: &Config) -> CliResult<()> {
    let log_path = config.store.persist_dir.join(LOG_FILE);
    if log_path.exists() {
        return Err(CliError::AlreadyInitialized(
            config.store.persist_dir.clone(),
        ));
    }
    let store = PersistentStore::open(&config.store)?;
    println!("initialized: {}", store.log_path().display());
    Ok(())
}

fn open_client(config: &Config) -> CliResult<Client> {
    let service = StoreService::open(config)?;
    Ok(Client::local(Arc::new(service)))
}

fn boolean_feature(name: &str) -> CliResult<BooleanFeature> {
    let feature =
        Feature::from_name(name).ok_or_else(|| CliError::UnknownFeature(name.to_string()))?;
    BooleanFeature::from_feature(feature).map_err(|_| CliError::NotBoolean(name.to_string()))
}
