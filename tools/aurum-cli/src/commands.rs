//! Command implementations.

use std::path::Path;

use aurum_server::Config;
use aurum_storage::{KeyValueStore, StorageFactory};

use crate::error::{CliError, Result};
use crate::{Cli, DbCommands};

/// Execute a key-value store command against the node's data directory.
pub fn db(cli: &Cli, command: &DbCommands) -> Result<()> {
    let store = open_store(cli)?;

    let outcome = match command {
        DbCommands::Get { key, hex } => get(&store, key, *hex),
        DbCommands::Put { key, value, hex } => put(&store, key, value, *hex),
        DbCommands::Del { key, hex } => del(&store, key, *hex),
    };

    // release the backend even when the command failed
    let closed = store.close();
    outcome?;
    closed?;
    Ok(())
}

/// Print the default node configuration as pretty JSON.
pub fn export_config(output: Option<&Path>) -> Result<()> {
    let encoded = serde_json::to_string_pretty(&Config::default())?;

    match output {
        Some(path) => {
            if path.exists() {
                return Err(CliError::FileExists(path.to_path_buf()));
            }
            std::fs::write(path, encoded)?;
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

fn open_store(cli: &Cli) -> Result<KeyValueStore> {
    let data_dir = cli.data_dir.clone().ok_or(CliError::NoDataDir)?;
    let config = Config { data_dir, ..Default::default() };

    let factory = StorageFactory::default();
    Ok(factory.open(&cli.backend, &config.storage_options())?)
}

fn get(store: &KeyValueStore, key: &str, hex_encoded: bool) -> Result<()> {
    let key = decode_arg(key, hex_encoded)?;

    match store.get(&key)? {
        Some(value) => println!("0x{}", hex::encode(value)),
        None => println!("(not found)"),
    }
    Ok(())
}

fn put(store: &KeyValueStore, key: &str, value: &str, hex_encoded: bool) -> Result<()> {
    let key = decode_arg(key, hex_encoded)?;
    let value = decode_arg(value, hex_encoded)?;

    store.set(&key, &value)?;
    Ok(())
}

fn del(store: &KeyValueStore, key: &str, hex_encoded: bool) -> Result<()> {
    let key = decode_arg(key, hex_encoded)?;

    let mut batch = store.batch();
    batch.delete(&key);
    batch.write()?;
    Ok(())
}

/// Decode a command argument into raw bytes.
///
/// Hex arguments may carry an `0x` prefix.
fn decode_arg(arg: &str, hex_encoded: bool) -> Result<Vec<u8>> {
    if !hex_encoded {
        return Ok(arg.as_bytes().to_vec());
    }

    let stripped = arg.strip_prefix("0x").unwrap_or(arg);
    hex::decode(stripped).map_err(|_| CliError::InvalidHex(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_arguments_pass_through_as_bytes() {
        assert_eq!(decode_arg("head", false).expect("decode failed"), b"head".to_vec());
    }

    #[test]
    fn hex_arguments_decode_with_or_without_prefix() {
        assert_eq!(decode_arg("0xdead", true).expect("decode failed"), vec![0xDE, 0xAD]);
        assert_eq!(decode_arg("dead", true).expect("decode failed"), vec![0xDE, 0xAD]);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(matches!(decode_arg("0xzz", true), Err(CliError::InvalidHex(_))));
    }

    #[test]
    fn db_commands_round_trip_through_the_store() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let cli = Cli {
            data_dir: Some(dir.path().to_path_buf()),
            backend: "sled".to_string(),
            command: crate::Commands::Db(DbCommands::Get { key: "head".into(), hex: false }),
        };

        db(&cli, &DbCommands::Put { key: "head".into(), value: "0x01".into(), hex: false })
            .expect("put failed");
        db(&cli, &DbCommands::Get { key: "head".into(), hex: false }).expect("get failed");
        db(&cli, &DbCommands::Del { key: "head".into(), hex: false }).expect("del failed");
    }

    #[test]
    fn missing_data_dir_is_reported() {
        let cli = Cli {
            data_dir: None,
            backend: "sled".to_string(),
            command: crate::Commands::Db(DbCommands::Get { key: "head".into(), hex: false }),
        };

        let err = db(&cli, &DbCommands::Get { key: "head".into(), hex: false }).unwrap_err();
        assert!(matches!(err, CliError::NoDataDir));
    }
}
