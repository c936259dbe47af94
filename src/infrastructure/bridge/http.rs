//! HTTP wallet agent transport
//!
//! Speaks JSON-RPC 2.0 to a locally running wallet agent, the desktop
//! equivalent of a browser-injected provider (a Frame-style signer
//! listening on localhost). The agent owns keys, prompts, and chain
//! management; this side only relays `{method, params}` requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::infrastructure::bridge::{BridgeError, WalletBridge, TRANSPORT_ERROR_CODE};
use crate::shared::constants::{CHAIN_POLL_INTERVAL_MS, DEFAULT_BRIDGE_URL};
use crate::shared::types::ChainId;
use crate::shared::utils::parse_hex_quantity;

/// Wallet agent connection over HTTP
pub struct HttpBridge {
    endpoint: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpBridge {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Endpoint from `BYTECAST_BRIDGE_URL`, falling back to the default
    /// local agent port.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("BYTECAST_BRIDGE_URL")
            .unwrap_or_else(|_| DEFAULT_BRIDGE_URL.to_string());
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the agent once. `None` means no provider is present.
    pub async fn detect() -> Option<Arc<Self>> {
        let bridge = Arc::new(Self::from_env());
        match bridge.raw_request("eth_chainId", json!([])).await {
            Ok(_) => Some(bridge),
            Err(e) => {
                log::warn!("no wallet agent at {}: {}", bridge.endpoint, e);
                None
            }
        }
    }

    async fn raw_request(&self, method: &str, params: Value) -> Result<Value, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| BridgeError::transport(format!("wallet agent unreachable: {}", e)))?;
        let resp_json: Value = resp
            .json()
            .await
            .map_err(|e| BridgeError::transport(format!("invalid wallet agent response: {}", e)))?;
        if let Some(error) = resp_json.get("error") {
            let code = error
                .get("code")
                .and_then(Value::as_i64)
                .unwrap_or(TRANSPORT_ERROR_CODE);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown wallet error")
                .to_string();
            return Err(BridgeError::new(code, message));
        }
        Ok(resp_json.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl WalletBridge for HttpBridge {
    async fn request(&self, method: &str, params: Value) -> Result<Value, BridgeError> {
        log::debug!("bridge request: {}", method);
        self.raw_request(method, params).await
    }

    /// The agent has no push channel over plain HTTP, so chain changes
    /// are observed by polling `eth_chainId`. The poll task exits once
    /// the receiver is dropped.
    async fn subscribe_chain_changes(&self) -> Result<UnboundedReceiver<ChainId>, BridgeError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            let mut last_seen: Option<ChainId> = None;
            loop {
                tokio::time::sleep(Duration::from_millis(CHAIN_POLL_INTERVAL_MS)).await;
                if tx.is_closed() {
                    break;
                }
                let body = json!({
                    "jsonrpc": "2.0",
                    "method": "eth_chainId",
                    "params": [],
                    "id": 0,
                });
                let chain_id = match client.post(&endpoint).json(&body).send().await {
                    Ok(resp) => match resp.json::<Value>().await {
                        Ok(v) => v
                            .get("result")
                            .and_then(Value::as_str)
                            .and_then(|s| parse_hex_quantity(s).ok()),
                        Err(_) => None,
                    },
                    Err(_) => None,
                };
                if let Some(id) = chain_id {
                    if last_seen != Some(id) {
                        last_seen = Some(id);
                        if tx.send(id).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Ok(rx)
    }
}
