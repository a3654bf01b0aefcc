//! Aria2 dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Aria2 JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aria2Config {
    /// RPC endpoint URL.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// RPC secret token, if the daemon requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for Aria2Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            secret: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_rpc_url() -> String {
    "http://localhost:6800/jsonrpc".to_string()
}

fn default_timeout() -> u32 {
    30
}
