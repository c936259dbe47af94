//! Deployment submission and confirmation
//!
//! A deployment is a recipient-less transaction whose data is the
//! creation bytecode. The wallet signs and broadcasts it; this side
//! keeps the hash from the immediate response and polls for the
//! receipt.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::infrastructure::bridge::WalletBridge;
use crate::shared::constants::{DEPLOY_GAS_LIMIT, RECEIPT_POLL_INTERVAL_MS};
use crate::shared::error::SessionError;
use crate::shared::types::{DeployReceipt, SessionResult, TransactionHash, TransactionStatus};
use crate::shared::utils::{
    ensure_hex_prefix, parse_hex_quantity, to_hex_quantity, validate_ethereum_address,
    validate_transaction_hash,
};

/// Builds and submits contract-creation transactions through the wallet
pub struct Deployer {
    bridge: Arc<dyn WalletBridge>,
}

impl Deployer {
    pub fn new(bridge: Arc<dyn WalletBridge>) -> Self {
        Self { bridge }
    }

    /// Submit the payload as a creation transaction: no recipient and a
    /// fixed gas ceiling. The returned handle exposes the hash
    /// immediately, before any confirmation.
    pub async fn submit(&self, from: &str, bytecode: &str) -> SessionResult<PendingDeployment> {
        let data = ensure_hex_prefix(bytecode);
        let result = self
            .bridge
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": from,
                    "data": data,
                    "gas": to_hex_quantity(DEPLOY_GAS_LIMIT),
                }]),
            )
            .await?;
        let hash = result.as_str().ok_or_else(|| {
            SessionError::transaction("eth_sendTransaction returned a non-string result")
        })?;
        if !validate_transaction_hash(hash) {
            return Err(SessionError::transaction(format!(
                "malformed transaction hash: {}",
                hash
            )));
        }
        log::info!("deployment submitted: {}", hash);
        Ok(PendingDeployment {
            bridge: self.bridge.clone(),
            hash: hash.to_string(),
        })
    }
}

/// Handle to a submitted deployment
pub struct PendingDeployment {
    bridge: Arc<dyn WalletBridge>,
    hash: TransactionHash,
}

impl std::fmt::Debug for PendingDeployment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingDeployment")
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

impl PendingDeployment {
    pub fn transaction_hash(&self) -> &str {
        &self.hash
    }

    /// Wait for the receipt. There is no timeout: the transaction either
    /// confirms, fails, or the bridge reports an error.
    pub async fn confirm(self) -> SessionResult<DeployReceipt> {
        loop {
            let result = self
                .bridge
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await
                .map_err(|e| SessionError::confirmation(e.to_string()))?;
            if result.is_null() {
                tokio::time::sleep(Duration::from_millis(RECEIPT_POLL_INTERVAL_MS)).await;
                continue;
            }
            return Ok(parse_receipt(&self.hash, &result));
        }
    }
}

fn parse_receipt(hash: &str, receipt: &Value) -> DeployReceipt {
    let status = match receipt.get("status").and_then(Value::as_str) {
        Some("0x0") => TransactionStatus::Failed,
        _ => TransactionStatus::Confirmed,
    };
    let contract_address = receipt
        .get("contractAddress")
        .and_then(Value::as_str)
        .filter(|addr| validate_ethereum_address(addr))
        .map(str::to_string);
    let block_number = receipt
        .get("blockNumber")
        .and_then(Value::as_str)
        .and_then(|s| parse_hex_quantity(s).ok());
    DeployReceipt {
        transaction_hash: hash.to_string(),
        contract_address,
        block_number,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bridge::{BridgeError, MockWalletBridge};
    use std::sync::Mutex;

    const HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    #[tokio::test]
    async fn test_submit_normalizes_payload_and_omits_recipient() {
        let mut mock = MockWalletBridge::new();
        mock.expect_request()
            .withf(|method, params| {
                method == "eth_sendTransaction"
                    && params[0]["data"] == "0x60006000f3"
                    && params[0]["gas"] == "0x493e0"
                    && params[0].get("to").is_none()
            })
            .times(1)
            .returning(|_, _| Ok(json!(HASH)));
        let deployer = Deployer::new(Arc::new(mock));
        let pending = deployer
            .submit("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6", "60006000f3")
            .await
            .expect("submit failed");
        assert_eq!(pending.transaction_hash(), HASH);
    }

    #[tokio::test]
    async fn test_submit_keeps_existing_prefix() {
        let mut mock = MockWalletBridge::new();
        mock.expect_request()
            .withf(|method, params| {
                method == "eth_sendTransaction" && params[0]["data"] == "0x60006000f3"
            })
            .times(1)
            .returning(|_, _| Ok(json!(HASH)));
        let deployer = Deployer::new(Arc::new(mock));
        deployer
            .submit("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6", "0x60006000f3")
            .await
            .expect("submit failed");
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_hash() {
        let mut mock = MockWalletBridge::new();
        mock.expect_request()
            .returning(|_, _| Ok(json!("not-a-hash")));
        let deployer = Deployer::new(Arc::new(mock));
        let err = deployer
            .submit("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6", "60006000f3")
            .await
            .expect_err("expected a transaction error");
        assert!(matches!(err, SessionError::Transaction(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_polls_until_receipt_appears() {
        let mut mock = MockWalletBridge::new();
        let calls = Mutex::new(0u32);
        mock.expect_request()
            .withf(|method, params| {
                method == "eth_getTransactionReceipt" && params[0] == HASH
            })
            .returning(move |_, _| {
                let mut calls = calls.lock().expect("poisoned");
                *calls += 1;
                if *calls < 3 {
                    Ok(Value::Null)
                } else {
                    Ok(json!({
                        "status": "0x1",
                        "contractAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                        "blockNumber": "0x10",
                    }))
                }
            });
        let pending = PendingDeployment {
            bridge: Arc::new(mock),
            hash: HASH.to_string(),
        };
        let receipt = pending.confirm().await.expect("confirm failed");
        assert_eq!(receipt.status, TransactionStatus::Confirmed);
        assert_eq!(
            receipt.contract_address.as_deref(),
            Some("0x5FbDB2315678afecb367f032d93F642f64180aa3")
        );
        assert_eq!(receipt.block_number, Some(16));
    }

    #[tokio::test]
    async fn test_confirm_surfaces_bridge_failure() {
        let mut mock = MockWalletBridge::new();
        mock.expect_request()
            .returning(|_, _| Err(BridgeError::transport("agent disconnected")));
        let pending = PendingDeployment {
            bridge: Arc::new(mock),
            hash: HASH.to_string(),
        };
        let err = pending.confirm().await.expect_err("expected failure");
        assert!(matches!(err, SessionError::Confirmation(_)));
    }

    #[test]
    fn test_parse_receipt_without_address() {
        let receipt = parse_receipt(HASH, &json!({ "status": "0x1", "contractAddress": null }));
        assert_eq!(receipt.status, TransactionStatus::Confirmed);
        assert_eq!(receipt.contract_address, None);
    }

    #[test]
    fn test_parse_receipt_reverted() {
        let receipt = parse_receipt(HASH, &json!({ "status": "0x0" }));
        assert_eq!(receipt.status, TransactionStatus::Failed);
    }

    #[test]
    fn test_parse_receipt_ignores_malformed_address() {
        let receipt = parse_receipt(HASH, &json!({ "status": "0x1", "contractAddress": "0x12" }));
        assert_eq!(receipt.contract_address, None);
    }
}
