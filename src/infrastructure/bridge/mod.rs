//! Wallet provider boundary
//!
//! A wallet agent exposes the `request({method, params})` surface of a
//! browser-injected provider. Everything the session controller needs
//! from the wallet goes through the [`WalletBridge`] trait, so tests can
//! stand in a mock and the transport can change without touching the
//! session logic.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::shared::constants::{CHAIN_UNRECOGNIZED_CODE, USER_REJECTED_CODE};
use crate::shared::error::SessionError;
use crate::shared::types::ChainId;

pub mod http;

pub use http::HttpBridge;

/// Transport failures use this code; provider errors keep the code the
/// wallet returned.
pub const TRANSPORT_ERROR_CODE: i64 = -32000;

/// Error returned through the wallet agent, carrying the provider's
/// numeric code.
#[derive(Error, Debug, Clone)]
#[error("wallet error {code}: {message}")]
pub struct BridgeError {
    pub code: i64,
    pub message: String,
}

impl BridgeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TRANSPORT_ERROR_CODE, message)
    }

    /// The wallet does not know the chain; it must be added before it
    /// can be switched to.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == CHAIN_UNRECOGNIZED_CODE
    }

    /// The user dismissed the wallet prompt
    pub fn is_user_rejected(&self) -> bool {
        self.code == USER_REJECTED_CODE
    }
}

impl From<BridgeError> for SessionError {
    fn from(err: BridgeError) -> Self {
        if err.is_unrecognized_chain() {
            SessionError::unrecognized_chain(err.message)
        } else if err.is_user_rejected() {
            SessionError::rejected(err.message)
        } else {
            SessionError::bridge(err.to_string())
        }
    }
}

/// Wallet provider surface consumed by the session controller
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WalletBridge: Send + Sync {
    /// Issue a `{method, params}` request and return the raw result value
    async fn request(&self, method: &str, params: Value) -> Result<Value, BridgeError>;

    /// Subscribe to chain-change notifications. Dropping the receiver
    /// deregisters the subscription.
    async fn subscribe_chain_changes(&self) -> Result<UnboundedReceiver<ChainId>, BridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_predicates() {
        assert!(BridgeError::new(4902, "Unrecognized chain ID").is_unrecognized_chain());
        assert!(BridgeError::new(4001, "User rejected the request").is_user_rejected());
        assert!(!BridgeError::transport("connection refused").is_unrecognized_chain());
        assert!(!BridgeError::transport("connection refused").is_user_rejected());
    }

    #[test]
    fn test_bridge_error_maps_to_session_error_kinds() {
        let unrecognized: SessionError = BridgeError::new(4902, "Unrecognized chain ID").into();
        assert!(matches!(unrecognized, SessionError::UnrecognizedChain(_)));

        let rejected: SessionError = BridgeError::new(4001, "User rejected the request").into();
        assert!(matches!(rejected, SessionError::Rejected(_)));

        let other: SessionError = BridgeError::transport("connection refused").into();
        assert!(matches!(other, SessionError::Bridge(_)));
    }

    #[test]
    fn test_bridge_error_display_keeps_code() {
        let err = BridgeError::new(4902, "Unrecognized chain ID");
        assert_eq!(format!("{}", err), "wallet error 4902: Unrecognized chain ID");
    }
}
