//! Node configuration structs.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use aurum_storage::BackendOptions;

/// Default port for the gRPC operator service.
pub const DEFAULT_GRPC_PORT: u16 = 9632;

/// Default port for the JSON-RPC server.
pub const DEFAULT_JSONRPC_PORT: u16 = 8545;

/// Default port for the libp2p transport.
pub const DEFAULT_LIBP2P_PORT: u16 = 1478;

/// Log verbosity for the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal operational output.
    #[default]
    Info,
    /// Verbose diagnostics.
    Debug,
    /// Everything, including per-operation traces.
    Trace,
}

impl LogLevel {
    /// Directive string understood by the tracing env filter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Parameters for the minimal node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory for node state.
    pub data_dir: PathBuf,

    /// Optional archive to restore chain state from at startup.
    pub restore_file: Option<PathBuf>,

    /// JSON-RPC server settings.
    pub jsonrpc: JsonRpcConfig,

    /// Listen address for the gRPC operator service.
    pub grpc_addr: SocketAddr,

    /// Listen address for the libp2p transport.
    pub libp2p_addr: SocketAddr,

    /// Minimum gas price accepted into the transaction pool.
    pub price_limit: u64,

    /// Maximum queued transactions per account.
    pub max_account_enqueued: u64,

    /// Maximum transaction slots in the pool.
    pub max_slots: u64,

    /// Metric export settings.
    pub telemetry: TelemetryConfig,

    /// Whether this node seals blocks.
    pub seal: bool,

    /// Log verbosity.
    pub log_level: LogLevel,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_log_format: bool,

    /// Mirror logs to this file in addition to stdout.
    pub log_file_path: Option<PathBuf>,

    /// Whether the relayer is enabled.
    pub relayer: bool,

    /// Blocks to wait before treating an event as final.
    pub num_block_confirmations: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            restore_file: None,
            jsonrpc: JsonRpcConfig::default(),
            grpc_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_GRPC_PORT),
            libp2p_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_LIBP2P_PORT),
            price_limit: 0,
            max_account_enqueued: 128,
            max_slots: 4096,
            telemetry: TelemetryConfig::default(),
            seal: true,
            log_level: LogLevel::default(),
            json_log_format: false,
            log_file_path: None,
            relayer: false,
            num_block_confirmations: 64,
        }
    }
}

impl Config {
    /// Directory holding the node's key-value store.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("blockchain")
    }

    /// Factory options for opening the node's store.
    pub fn storage_options(&self) -> BackendOptions {
        BackendOptions::with_path(self.storage_path())
    }
}

/// Settings for the JSON-RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonRpcConfig {
    /// Listen address.
    pub addr: SocketAddr,

    /// Origins allowed by CORS; `*` allows everything.
    pub access_control_allow_origin: Vec<String>,

    /// Maximum requests in one batch; 0 disables the limit.
    pub batch_length_limit: u64,

    /// Maximum block span a single query may cover; 0 disables the limit.
    pub block_range_limit: u64,

    /// Concurrent requests allowed on the debug namespace.
    pub concurrent_requests_debug: u64,

    /// Bearer token required on every request, when set.
    pub auth_token: Option<String>,

    /// Methods served when non-empty; everything otherwise.
    pub allowlist: Vec<String>,
}

impl Default for JsonRpcConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_JSONRPC_PORT),
            access_control_allow_origin: vec!["*".to_string()],
            batch_length_limit: 20,
            block_range_limit: 1000,
            concurrent_requests_debug: 32,
            auth_token: None,
            allowlist: Vec::new(),
        }
    }
}

/// Settings for metric export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Prometheus scrape endpoint; `None` disables metrics export.
    pub prometheus_addr: Option<SocketAddr>,
}
