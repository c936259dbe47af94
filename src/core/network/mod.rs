//! Typed wallet operations
//!
//! Wraps the raw `{method, params}` bridge surface with the specific
//! requests the session controller issues: chain queries, the network
//! switch/add pair, and account access.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::infrastructure::bridge::{BridgeError, WalletBridge};
use crate::shared::error::SessionError;
use crate::shared::types::{Address, ChainId, Network, SessionResult};
use crate::shared::utils::parse_hex_quantity;

/// Client for the wallet's session-level requests
#[derive(Clone)]
pub struct WalletClient {
    bridge: Arc<dyn WalletBridge>,
}

impl WalletClient {
    pub fn new(bridge: Arc<dyn WalletBridge>) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> Arc<dyn WalletBridge> {
        self.bridge.clone()
    }

    /// Chain the wallet is currently connected to
    pub async fn chain_id(&self) -> SessionResult<ChainId> {
        let result = self.bridge.request("eth_chainId", json!([])).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| SessionError::bridge("eth_chainId returned a non-string result"))?;
        parse_hex_quantity(hex)
    }

    /// Ask the wallet to switch to the network's declared chain id
    pub async fn switch_chain(&self, network: Network) -> Result<(), BridgeError> {
        self.bridge
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": network.chain_id_hex() }]),
            )
            .await?;
        Ok(())
    }

    /// Ask the wallet to add the network, passing the full declared
    /// profile. A successful add also switches to the new chain.
    pub async fn add_chain(&self, network: Network) -> Result<(), BridgeError> {
        let currency = network.native_currency();
        self.bridge
            .request(
                "wallet_addEthereumChain",
                json!([{
                    "chainId": network.chain_id_hex(),
                    "chainName": network.name(),
                    "nativeCurrency": {
                        "name": currency.name,
                        "symbol": currency.symbol,
                        "decimals": currency.decimals,
                    },
                    "rpcUrls": network.rpc_urls(),
                    "blockExplorerUrls": [network.block_explorer()],
                }]),
            )
            .await?;
        Ok(())
    }

    /// Switch to the target chain, adding it first when the wallet does
    /// not recognize it. Any other failure is final.
    pub async fn ensure_network(&self, network: Network) -> SessionResult<()> {
        match self.switch_chain(network).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_unrecognized_chain() => {
                log::info!("{} unknown to wallet, requesting add", network.name());
                self.add_chain(network).await.map_err(|err| {
                    if err.is_user_rejected() {
                        SessionError::rejected(format!("network add refused: {}", err.message))
                    } else {
                        SessionError::from(err)
                    }
                })
            }
            Err(err) if err.is_user_rejected() => Err(SessionError::rejected(format!(
                "network switch refused: {}",
                err.message
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Request account access; returns the wallet's address list
    pub async fn request_accounts(&self) -> SessionResult<Vec<Address>> {
        let result = self.bridge.request("eth_requestAccounts", json!([])).await?;
        let accounts = result
            .as_array()
            .ok_or_else(|| {
                SessionError::bridge("eth_requestAccounts returned a non-array result")
            })?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
        Ok(accounts)
    }
}
