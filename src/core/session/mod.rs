//! Wallet session controller
//!
//! Owns the session state and drives every wallet interaction: chain
//! observation, network switching, account connection, and bytecode
//! deployment. A failure never propagates past its handler; each one
//! lands in the status the user sees, and every outcome is also
//! returned as a typed error for callers that want to branch on it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::core::network::WalletClient;
use crate::core::transactions::Deployer;
use crate::domain::entities::{SessionState, Status};
use crate::infrastructure::bridge::WalletBridge;
use crate::shared::error::SessionError;
use crate::shared::types::{Address, DeployReceipt, Network, SessionResult, TransactionStatus};
use crate::shared::utils::validate_bytecode;

/// Drives a single wallet session
pub struct SessionController {
    bridge: Option<Arc<dyn WalletBridge>>,
    state: Arc<RwLock<SessionState>>,
    chain_listener: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl SessionController {
    pub fn new(bridge: Option<Arc<dyn WalletBridge>>) -> Self {
        Self {
            bridge,
            state: Arc::new(RwLock::new(SessionState::default())),
            chain_listener: std::sync::Mutex::new(None),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.bridge.is_some()
    }

    fn client(&self) -> SessionResult<WalletClient> {
        self.bridge
            .as_ref()
            .map(|bridge| WalletClient::new(bridge.clone()))
            .ok_or_else(|| SessionError::no_provider("no wallet agent is connected"))
    }

    /// Cloned view of the session for rendering
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Query the wallet's current chain and follow its changes for the
    /// lifetime of the controller. Does nothing without a provider.
    pub async fn observe_chain(&self) -> SessionResult<()> {
        let (client, bridge) = match (self.client(), self.bridge.as_ref()) {
            (Ok(client), Some(bridge)) => (client, bridge),
            _ => return Ok(()),
        };
        match client.chain_id().await {
            Ok(chain_id) => self.state.write().await.observe_chain_id(chain_id),
            Err(e) => log::warn!("could not read wallet chain id: {}", e),
        }
        let mut rx = bridge.subscribe_chain_changes().await?;
        let state = self.state.clone();
        let handle = tokio::spawn(async move {
            while let Some(chain_id) = rx.recv().await {
                log::info!("wallet chain changed: {}", chain_id);
                state.write().await.observe_chain_id(chain_id);
            }
        });
        if let Ok(mut listener) = self.chain_listener.lock() {
            if let Some(previous) = listener.replace(handle) {
                previous.abort();
            }
        }
        Ok(())
    }

    /// Stop following chain changes. Also runs on drop.
    pub fn shutdown(&self) {
        if let Ok(mut listener) = self.chain_listener.lock() {
            if let Some(handle) = listener.take() {
                handle.abort();
            }
        }
    }

    /// Switch the wallet to the given network, adding it if unknown
    pub async fn ensure_network(&self, network: Network) -> SessionResult<()> {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                self.state.write().await.set_status(Status::NoProvider);
                return Err(e);
            }
        };
        match client.ensure_network(network).await {
            Ok(()) => {
                self.state.write().await.set_status(Status::Switched(network));
                Ok(())
            }
            Err(e) => {
                self.state
                    .write()
                    .await
                    .set_status(Status::NetworkFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Connect: network first, accounts second. A failed switch aborts
    /// before any account request is made.
    pub async fn connect(&self) -> SessionResult<Address> {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                self.state.write().await.set_status(Status::NoProvider);
                return Err(e);
            }
        };
        let target = self.state.read().await.target;
        self.ensure_network(target).await?;
        match client.request_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    self.state.write().await.set_account(account.clone());
                    Ok(account)
                }
                None => {
                    let err = SessionError::rejected("wallet returned no accounts");
                    self.state
                        .write()
                        .await
                        .set_status(Status::ConnectFailed(err.to_string()));
                    Err(err)
                }
            },
            Err(e) => {
                self.state
                    .write()
                    .await
                    .set_status(Status::ConnectFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Purely local; wallet-side permission is not revoked
    pub async fn disconnect(&self) {
        self.state.write().await.clear_account();
    }

    /// Select a target network; switching stays explicit
    pub async fn set_target(&self, network: Network) {
        self.state.write().await.set_target(network);
    }

    pub async fn set_bytecode(&self, bytecode: &str) {
        self.state.write().await.set_bytecode(bytecode);
    }

    /// Load the known-good empty-contract creation bytecode into the form
    pub async fn fill_test_payload(&self) {
        self.state.write().await.fill_test_payload();
    }

    pub async fn reset(&self) {
        self.state.write().await.reset();
    }

    /// Submit the buffered bytecode as a contract-creation transaction.
    ///
    /// Deployments always run on Sepolia, whatever target is selected:
    /// this form never spends mainnet funds.
    pub async fn deploy(&self) -> SessionResult<DeployReceipt> {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                self.state.write().await.set_status(Status::NoProvider);
                return Err(e);
            }
        };

        // Local validation happens before any wallet traffic
        let raw = self.state.read().await.bytecode.clone();
        let payload = match validate_bytecode(&raw) {
            Ok(trimmed) => trimmed.to_string(),
            Err(e) => {
                self.state
                    .write()
                    .await
                    .set_status(Status::InvalidInput(e.to_string()));
                return Err(e);
            }
        };

        eprintln!("DBG: before write NetworkChecking");
        self.state.write().await.set_status(Status::NetworkChecking);
        eprintln!("DBG: after write NetworkChecking, before ensure_network call");
        if let Err(e) = client.ensure_network(Network::Sepolia).await {
            self.state
                .write()
                .await
                .set_status(Status::NetworkFailed(e.to_string()));
            return Err(e);
        }

        eprintln!("DBG: after ensure_network, before read account");
        let existing_account = self.state.read().await.account.clone();
        let from = match existing_account {
            Some(account) => account,
            None => match self.resolve_account(&client).await {
                Ok(account) => account,
                Err(e) => {
                    self.state
                        .write()
                        .await
                        .set_status(Status::TxFailed(e.to_string()));
                    return Err(e);
                }
            },
        };

        eprintln!("DBG: after ensure_network, from resolved, before submit");
        self.state.write().await.set_status(Status::Submitting);
        let deployer = Deployer::new(client.bridge());
        let pending = match deployer.submit(&from, &payload).await {
            Ok(pending) => pending,
            Err(e) => {
                self.state
                    .write()
                    .await
                    .set_status(Status::TxFailed(e.to_string()));
                return Err(e);
            }
        };

        // Hash is visible from here on, even if confirmation later fails
        self.state
            .write()
            .await
            .record_submission(pending.transaction_hash().to_string());

        eprintln!("DBG: submitted, before confirm");
        let receipt = match pending.confirm().await {
            Ok(receipt) => receipt,
            Err(e) => {
                self.state
                    .write()
                    .await
                    .set_status(Status::TxFailed(e.to_string()));
                return Err(e);
            }
        };

        if receipt.status == TransactionStatus::Failed {
            let err = SessionError::transaction("transaction reverted");
            self.state
                .write()
                .await
                .set_status(Status::TxFailed(err.to_string()));
            return Err(err);
        }

        let mut state = self.state.write().await;
        match receipt.contract_address.clone() {
            Some(address) => state.record_deployed_address(address),
            None => state.set_status(Status::ConfirmedNoAddress),
        }
        drop(state);
        Ok(receipt)
    }

    /// Signer binding for a deploy issued before connect: ask the wallet
    /// for an account. Runs only after the network step.
    async fn resolve_account(&self, client: &WalletClient) -> SessionResult<Address> {
        let accounts = client.request_accounts().await?;
        match accounts.into_iter().next() {
            Some(account) => {
                self.state.write().await.set_account(account.clone());
                Ok(account)
            }
            None => Err(SessionError::rejected("wallet returned no accounts")),
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.shutdown();
        log::debug!("session controller dropped");
    }
}
