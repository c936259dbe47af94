//! Session entity and status model
//!
//! The session entity owns everything the form renders: the connected
//! account, the observed wallet chain, the selected target network, the
//! pending bytecode buffer, and the outcome of the last deployment.
//! Handlers mutate it through one entry point per concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::constants::TEST_BYTECODE;
use crate::shared::types::{Address, ChainId, Network, TransactionHash};
use crate::shared::utils::{address_url, tx_url};

/// Outcome of each asynchronous step, rendered to the user as a message.
///
/// A single deploy attempt walks `Idle -> NetworkChecking ->
/// (NetworkFailed | Submitting) -> TxPending -> (ConfirmedWithAddress |
/// ConfirmedNoAddress | TxFailed)`. Every terminal state is recoverable
/// by retrying the action; nothing retries on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Idle,
    NoProvider,
    Switched(Network),
    NetworkChecking,
    NetworkFailed(String),
    Connected(Address),
    ConnectFailed(String),
    InvalidInput(String),
    Submitting,
    TxPending(TransactionHash),
    ConfirmedWithAddress(Address),
    ConfirmedNoAddress,
    TxFailed(String),
}

impl Status {
    /// Human-readable line for the status panel
    pub fn message(&self) -> String {
        match self {
            Status::Idle => String::new(),
            Status::NoProvider => {
                "No wallet agent found. Start one and retry.".to_string()
            }
            Status::Switched(network) => format!("Switched to {}", network.name()),
            Status::NetworkChecking => "Checking network...".to_string(),
            Status::NetworkFailed(reason) => format!("Network switch failed: {}", reason),
            Status::Connected(account) => format!("Connected: {}", account),
            Status::ConnectFailed(reason) => format!("Connect failed: {}", reason),
            Status::InvalidInput(reason) => reason.clone(),
            Status::Submitting => "Submitting deployment transaction...".to_string(),
            Status::TxPending(hash) => format!("Transaction submitted: {}", hash),
            Status::ConfirmedWithAddress(address) => {
                format!("Contract deployed at {}", address)
            }
            Status::ConfirmedNoAddress => {
                "Transaction confirmed, but no contract address was created".to_string()
            }
            Status::TxFailed(reason) => format!("Deployment failed: {}", reason),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::NoProvider
                | Status::NetworkFailed(_)
                | Status::ConnectFailed(_)
                | Status::InvalidInput(_)
                | Status::TxFailed(_)
        )
    }
}

/// Ephemeral per-session state driving the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub account: Option<Address>,
    pub wallet_chain_id: Option<ChainId>,
    pub target: Network,
    pub status: Status,
    pub bytecode: String,
    pub tx_hash: Option<TransactionHash>,
    pub contract_address: Option<Address>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(target: Network) -> Self {
        Self {
            account: None,
            wallet_chain_id: None,
            target,
            status: Status::Idle,
            bytecode: String::new(),
            tx_hash: None,
            contract_address: None,
            updated_at: Utc::now(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: Status) {
        log::debug!("status: {}", status.message());
        self.status = status;
        self.touch();
    }

    /// Select a target network; switching stays explicit
    pub fn set_target(&mut self, target: Network) {
        self.target = target;
        self.touch();
    }

    pub fn set_account(&mut self, account: Address) {
        self.status = Status::Connected(account.clone());
        self.account = Some(account);
        self.touch();
    }

    /// Disconnect is purely local; the wallet keeps whatever permission
    /// it already granted.
    pub fn clear_account(&mut self) {
        self.account = None;
        self.status = Status::Idle;
        self.touch();
    }

    pub fn observe_chain_id(&mut self, chain_id: ChainId) {
        self.wallet_chain_id = Some(chain_id);
        self.touch();
    }

    pub fn set_bytecode(&mut self, bytecode: impl Into<String>) {
        self.bytecode = bytecode.into();
        self.touch();
    }

    pub fn fill_test_payload(&mut self) {
        self.bytecode = TEST_BYTECODE.to_string();
        self.touch();
    }

    /// The hash is recorded before any confirmation and survives a later
    /// confirmation failure.
    pub fn record_submission(&mut self, hash: TransactionHash) {
        self.status = Status::TxPending(hash.clone());
        self.tx_hash = Some(hash);
        self.contract_address = None;
        self.touch();
    }

    pub fn record_deployed_address(&mut self, address: Address) {
        self.status = Status::ConfirmedWithAddress(address.clone());
        self.contract_address = Some(address);
        self.touch();
    }

    /// Clears payload, status, transaction hash, and contract address
    /// together. The connected account and the selected target survive.
    pub fn reset(&mut self) {
        self.bytecode.clear();
        self.status = Status::Idle;
        self.tx_hash = None;
        self.contract_address = None;
        self.touch();
    }

    pub fn observed_network(&self) -> Option<Network> {
        self.wallet_chain_id.and_then(Network::from_chain_id)
    }

    /// Explorer base: the wallet's observed chain when it is one of the
    /// supported networks, otherwise the selected target.
    pub fn explorer_base(&self) -> &'static str {
        self.observed_network().unwrap_or(self.target).block_explorer()
    }

    pub fn tx_link(&self) -> Option<String> {
        self.tx_hash
            .as_ref()
            .map(|hash| tx_url(self.explorer_base(), hash))
    }

    pub fn address_link(&self) -> Option<String> {
        self.contract_address
            .as_ref()
            .map(|address| address_url(self.explorer_base(), address))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Network::Sepolia)
    }
}
