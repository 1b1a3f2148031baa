//! Aurum Node Command Line Interface
//!
//! Thin wiring over the node's configuration and persistence layer: flag
//! registration, a config exporter, and direct key-value store access for
//! operators debugging a node's on-disk state.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

/// Aurum Node Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "aurum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory for node state
    #[arg(short, long, env = "AURUM_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend to open
    #[arg(short, long, default_value = aurum_storage::DEFAULT_BACKEND, global = true)]
    pub backend: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or mutate the node's key-value store
    #[command(subcommand)]
    Db(DbCommands),

    /// Work with the node configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Key-value store commands.
#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Look up a key and print its value
    Get {
        /// The key, as a UTF-8 string (or hex with --hex)
        key: String,

        /// Treat key arguments as hex-encoded bytes
        #[arg(long)]
        hex: bool,
    },

    /// Durably write a key-value pair
    Put {
        /// The key, as a UTF-8 string (or hex with --hex)
        key: String,

        /// The value, as a UTF-8 string (or hex with --hex)
        value: String,

        /// Treat key and value arguments as hex-encoded bytes
        #[arg(long)]
        hex: bool,
    },

    /// Remove a key (committed through a batch)
    Del {
        /// The key, as a UTF-8 string (or hex with --hex)
        key: String,

        /// Treat key arguments as hex-encoded bytes
        #[arg(long)]
        hex: bool,
    },
}

/// Configuration commands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the default node configuration as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Db(command) => commands::db(cli, command),
        Commands::Config(ConfigCommands::Export { output }) => {
            commands::export_config(output.as_deref())
        }
    }
}
