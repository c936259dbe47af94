//! Bytecast
//!
//! Wallet session controller and creation-bytecode deploy console for
//! EVM networks.
//!
//! ## Architecture
//!
//! This library follows a simplified architecture focused on the session:
//!
//! - **Core**: session controller, typed wallet operations, deployment pipeline
//! - **Domain**: session entity and status model
//! - **Infrastructure**: the wallet agent bridge
//! - **Shared**: common types, constants, and utilities
//!
//! The crate talks to a wallet agent through its `{method, params}`
//! request surface. Keys never enter this process; signing and chain
//! management stay wallet-side.
//!
//! ## Usage
//!
//! ```no_run
//! use bytecast::{Network, SessionController};
//!
//! # async fn run() -> bytecast::SessionResult<()> {
//! let controller = bytecast::init_session().await;
//! controller.observe_chain().await?;
//! controller.set_target(Network::Sepolia).await;
//! controller.connect().await?;
//! controller.fill_test_payload().await;
//! let receipt = controller.deploy().await?;
//! println!("deployed at {:?}", receipt.contract_address);
//! # Ok(())
//! # }
//! ```

use dotenv::dotenv;
use std::env;
use std::sync::Arc;

// Re-export main modules for easy access
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export specific components
pub use crate::core::network::WalletClient;
pub use crate::core::session::SessionController;
pub use crate::core::transactions::{Deployer, PendingDeployment};
pub use crate::domain::entities::{SessionState, Status};
pub use crate::infrastructure::bridge::{BridgeError, HttpBridge, WalletBridge};
pub use crate::shared::error::SessionError;
pub use crate::shared::types::{DeployReceipt, Network, SessionResult, TransactionStatus};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize logging and environment configuration
pub fn init() {
    dotenv().ok();
    env_logger::init();
}

/// Build a session controller from the environment: wallet agent from
/// `BYTECAST_BRIDGE_URL`, default target from `BYTECAST_DEFAULT_NETWORK`.
/// A missing or unreachable agent yields a controller without a
/// provider; every wallet action then reports that instructively.
pub async fn init_session() -> SessionController {
    let bridge = HttpBridge::detect()
        .await
        .map(|bridge| bridge as Arc<dyn WalletBridge>);
    let controller = SessionController::new(bridge);
    let default_target = env::var("BYTECAST_DEFAULT_NETWORK")
        .ok()
        .and_then(|key| Network::from_key(&key));
    if let Some(network) = default_target {
        controller.set_target(network).await;
    }
    controller
}
