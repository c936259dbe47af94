//! Shared types for the deploy console

use serde::{Deserialize, Serialize};

use crate::shared::constants::{NetworkConfig, MAINNET_CONFIG, SEPOLIA_CONFIG};

// Basic types for session operations
pub type Address = String;
pub type TransactionHash = String;
pub type ChainId = u64;

/// Supported target networks. The set is closed: a wallet may report any
/// chain id, but only these two are ever selectable as a target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Sepolia,
}

impl Network {
    pub fn all() -> &'static [Network] {
        &[Network::Mainnet, Network::Sepolia]
    }

    fn config(&self) -> &'static NetworkConfig {
        match self {
            Network::Mainnet => &MAINNET_CONFIG,
            Network::Sepolia => &SEPOLIA_CONFIG,
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.config().chain_id
    }

    /// Chain id in the wallet protocol's hexadecimal form
    pub fn chain_id_hex(&self) -> &'static str {
        self.config().chain_id_hex
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Stable string key used in configuration and console commands
    pub fn key(&self) -> &'static str {
        self.config().key
    }

    pub fn rpc_urls(&self) -> &'static [&'static str] {
        self.config().rpc_urls
    }

    pub fn block_explorer(&self) -> &'static str {
        self.config().block_explorer
    }

    pub fn native_currency(&self) -> &'static NativeCurrency {
        &self.config().native_currency
    }

    pub fn from_key(key: &str) -> Option<Network> {
        Network::all().iter().copied().find(|n| n.key() == key)
    }

    pub fn from_chain_id(chain_id: ChainId) -> Option<Network> {
        Network::all().iter().copied().find(|n| n.chain_id() == chain_id)
    }
}

/// Native currency descriptor passed to the wallet when adding a chain
#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Confirmed-transaction result of a deployment. `contract_address` is
/// absent when the payload did not end in contract creation; that is a
/// valid outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployReceipt {
    pub transaction_hash: TransactionHash,
    pub contract_address: Option<Address>,
    pub block_number: Option<u64>,
    pub status: TransactionStatus,
}

// Result type for session operations
pub type SessionResult<T> = Result<T, crate::shared::error::SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), 1);
        assert_eq!(Network::Sepolia.chain_id(), 11155111);
        assert_eq!(Network::Mainnet.chain_id_hex(), "0x1");
        assert_eq!(Network::Sepolia.chain_id_hex(), "0xaa36a7");
    }

    #[test]
    fn test_network_names() {
        assert_eq!(Network::Mainnet.name(), "Ethereum Mainnet");
        assert_eq!(Network::Sepolia.name(), "Sepolia Testnet");
        assert_eq!(Network::Mainnet.key(), "mainnet");
        assert_eq!(Network::Sepolia.key(), "sepolia");
    }

    #[test]
    fn test_network_explorers() {
        assert_eq!(Network::Mainnet.block_explorer(), "https://etherscan.io");
        assert_eq!(Network::Sepolia.block_explorer(), "https://sepolia.etherscan.io");
    }

    #[test]
    fn test_network_native_currencies() {
        assert_eq!(Network::Mainnet.native_currency().symbol, "ETH");
        assert_eq!(Network::Sepolia.native_currency().decimals, 18);
    }

    #[test]
    fn test_network_lookup() {
        assert_eq!(Network::from_key("sepolia"), Some(Network::Sepolia));
        assert_eq!(Network::from_key("goerli"), None);
        assert_eq!(Network::from_chain_id(1), Some(Network::Mainnet));
        assert_eq!(Network::from_chain_id(11155111), Some(Network::Sepolia));
        // Anything outside the closed set is display-only
        assert_eq!(Network::from_chain_id(5), None);
    }

    #[test]
    fn test_network_rpc_urls_declared() {
        for network in Network::all() {
            assert!(!network.rpc_urls().is_empty());
        }
    }
}
