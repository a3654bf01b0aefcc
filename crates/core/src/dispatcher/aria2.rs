//! Aria2 JSON-RPC dispatcher implementation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{Aria2Config, DispatchError, Dispatcher};

/// Dispatcher that enqueues URIs into an aria2 daemon via `aria2.addUri`.
pub struct Aria2Dispatcher {
    client: Client,
    config: Aria2Config,
}

#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'static str,
    params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl Aria2Dispatcher {
    /// Build a dispatcher from config.
    pub fn new(config: Aria2Config) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| DispatchError::Rpc(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn build_params(&self, uri: &str, target_dir: &Path, filename: Option<&str>) -> Vec<Value> {
        let mut options = json!({
            "dir": target_dir.to_string_lossy(),
        });
        if let Some(name) = filename {
            options["out"] = json!(name);
        }

        let mut params = vec![json!([uri]), options];
        if let Some(secret) = &self.config.secret {
            params.insert(0, json!(format!("token:{}", secret)));
        }
        params
    }
}

#[async_trait]
impl Dispatcher for Aria2Dispatcher {
    async fn enqueue(
        &self,
        uri: &str,
        target_dir: &Path,
        filename: Option<&str>,
    ) -> Result<(), DispatchError> {
        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| DispatchError::TargetDir {
                path: target_dir.display().to_string(),
                reason: e.to_string(),
            })?;

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: "cinevault",
            method: "aria2.addUri",
            params: self.build_params(uri, target_dir, filename),
        };

        let response = self
            .client
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DispatchError::Rpc(e.to_string()))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::Rpc(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(DispatchError::RpcError {
                code: err.code,
                message: err.message,
            });
        }

        if let Some(gid) = body.result.as_ref().and_then(Value::as_str) {
            debug!("aria2 accepted download, gid={}", gid);
        }
        info!("Enqueued {} into {}", uri, target_dir.display());
        Ok(())
    }
}
