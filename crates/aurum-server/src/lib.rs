//! Aurum server configuration.
//!
//! Passive configuration data for the minimal node: network listen
//! addresses, transaction-pool limits, logging options, and the data
//! directory the persistence layer opens its store under. The structs here
//! carry no behavior beyond defaults and (de)serialization; the node wiring
//! and the CLI consume them.

mod config;

pub use config::{
    Config, JsonRpcConfig, LogLevel, TelemetryConfig, DEFAULT_GRPC_PORT, DEFAULT_JSONRPC_PORT,
    DEFAULT_LIBP2P_PORT,
};
