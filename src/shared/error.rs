//! Error handling for the deploy console
//!
//! This module defines the error types used throughout the session
//! controller. Every failure a handler can hit maps onto one of these
//! kinds, and the presentation layer turns the kind into a status line.

use thiserror::Error;

/// Session error type
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error("No wallet provider: {0}")]
    NoProvider(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Chain not recognized by wallet: {0}")]
    UnrecognizedChain(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bridge error: {0}")]
    Bridge(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Confirmation failed: {0}")]
    Confirmation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Create a no-provider error
    pub fn no_provider(message: impl Into<String>) -> Self {
        Self::NoProvider(message.into())
    }

    /// Create a user-rejection error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create an unrecognized-chain error
    pub fn unrecognized_chain(message: impl Into<String>) -> Self {
        Self::UnrecognizedChain(message.into())
    }

    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a bridge error
    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge(message.into())
    }

    /// Create a transaction error
    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction(message.into())
    }

    /// Create a confirmation error
    pub fn confirmation(message: impl Into<String>) -> Self {
        Self::Confirmation(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_creation() {
        let no_provider = SessionError::no_provider("no wallet agent");
        let rejected = SessionError::rejected("user dismissed the prompt");
        let invalid = SessionError::invalid_input("bytecode too short");

        assert!(matches!(no_provider, SessionError::NoProvider(_)));
        assert!(matches!(rejected, SessionError::Rejected(_)));
        assert!(matches!(invalid, SessionError::InvalidInput(_)));
    }

    #[test]
    fn test_error_display() {
        let error = SessionError::confirmation("agent disconnected");
        let display = format!("{}", error);

        assert!(display.contains("Confirmation failed"));
        assert!(display.contains("agent disconnected"));
    }
}
