//! Constants for the deploy console
//!
//! This module contains the network profiles and the fixed parameters of
//! the deployment form.

use crate::shared::types::NativeCurrency;

/// Static profile for a supported network
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub key: &'static str,
    pub chain_id: u64,
    pub chain_id_hex: &'static str,
    pub name: &'static str,
    pub rpc_urls: &'static [&'static str],
    pub block_explorer: &'static str,
    pub native_currency: NativeCurrency,
}

pub static MAINNET_CONFIG: NetworkConfig = NetworkConfig {
    key: "mainnet",
    chain_id: 1,
    chain_id_hex: "0x1",
    name: "Ethereum Mainnet",
    rpc_urls: &["https://eth.llamarpc.com"],
    block_explorer: "https://etherscan.io",
    native_currency: NativeCurrency {
        name: "Ether",
        symbol: "ETH",
        decimals: 18,
    },
};

pub static SEPOLIA_CONFIG: NetworkConfig = NetworkConfig {
    key: "sepolia",
    chain_id: 11155111,
    chain_id_hex: "0xaa36a7",
    name: "Sepolia Testnet",
    rpc_urls: &["https://rpc.sepolia.org"],
    block_explorer: "https://sepolia.etherscan.io",
    native_currency: NativeCurrency {
        name: "Sepolia Ether",
        symbol: "ETH",
        decimals: 18,
    },
};

// Deployment constants
/// Minimal "empty contract" creation bytecode used by the fill action
pub const TEST_BYTECODE: &str = "0x60006000f3";
/// Fixed gas ceiling for deployments. Payloads needing more are rejected
/// by the network rather than estimated here.
pub const DEPLOY_GAS_LIMIT: u64 = 300_000;
/// Sanity floor for a trimmed payload; not full hex validation
pub const MIN_BYTECODE_LEN: usize = 4;

// Wallet provider error codes
/// The wallet does not recognize the requested chain
pub const CHAIN_UNRECOGNIZED_CODE: i64 = 4902;
/// The user dismissed the wallet prompt
pub const USER_REJECTED_CODE: i64 = 4001;

// Bridge transport
pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:1248";
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 4_000;
pub const CHAIN_POLL_INTERVAL_MS: u64 = 2_000;
