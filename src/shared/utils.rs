//! Utility functions for the deploy console

use ethers::types::{H160, H256};

use crate::shared::constants::MIN_BYTECODE_LEN;
use crate::shared::error::SessionError;

/// Add the standard hex prefix iff absent
pub fn ensure_hex_prefix(payload: &str) -> String {
    if payload.starts_with("0x") {
        payload.to_string()
    } else {
        format!("0x{}", payload)
    }
}

/// Sanity floor for a creation payload: trimmed and at least four
/// characters. Not full hex validation; the wallet and the network do
/// the rest.
pub fn validate_bytecode(payload: &str) -> Result<&str, SessionError> {
    let trimmed = payload.trim();
    if trimmed.len() < MIN_BYTECODE_LEN {
        return Err(SessionError::invalid_input(
            "bytecode is empty or too short; paste creation bytecode or use the test payload",
        ));
    }
    Ok(trimmed)
}

/// Parse a 0x-prefixed hex quantity
pub fn parse_hex_quantity(value: &str) -> Result<u64, SessionError> {
    let digits = value.trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|_| SessionError::bridge(format!("invalid hex quantity: {}", value)))
}

/// Format a quantity in the wallet protocol's hexadecimal form
pub fn to_hex_quantity(value: u64) -> String {
    format!("0x{:x}", value)
}

pub fn validate_ethereum_address(address: &str) -> bool {
    address.parse::<H160>().is_ok()
}

pub fn validate_transaction_hash(hash: &str) -> bool {
    hash.parse::<H256>().is_ok()
}

/// Explorer link for a transaction
pub fn tx_url(explorer_base: &str, hash: &str) -> String {
    format!("{}/tx/{}", explorer_base, hash)
}

/// Explorer link for an address
pub fn address_url(explorer_base: &str, address: &str) -> String {
    format!("{}/address/{}", explorer_base, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_hex_prefix() {
        assert_eq!(ensure_hex_prefix("60006000f3"), "0x60006000f3");
        assert_eq!(ensure_hex_prefix("0x60006000f3"), "0x60006000f3");
    }

    #[test]
    fn test_validate_bytecode() {
        assert_eq!(validate_bytecode("  0x60006000f3  ").unwrap(), "0x60006000f3");
        assert!(validate_bytecode("").is_err());
        assert!(validate_bytecode("   ").is_err());
        assert!(validate_bytecode(" 0x1 ").is_err());
        assert!(validate_bytecode("6000").is_ok());
    }

    #[test]
    fn test_hex_quantities() {
        assert_eq!(parse_hex_quantity("0x1").unwrap(), 1);
        assert_eq!(parse_hex_quantity("0xaa36a7").unwrap(), 11155111);
        assert!(parse_hex_quantity("0xzz").is_err());
        assert_eq!(to_hex_quantity(300_000), "0x493e0");
        assert_eq!(parse_hex_quantity(&to_hex_quantity(11155111)).unwrap(), 11155111);
    }

    #[test]
    fn test_validate_ethereum_address() {
        assert!(validate_ethereum_address("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6"));
        assert!(validate_ethereum_address("0x0000000000000000000000000000000000000000"));
        assert!(!validate_ethereum_address("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b")); // Too short
        assert!(!validate_ethereum_address("not an address"));
    }

    #[test]
    fn test_validate_transaction_hash() {
        assert!(validate_transaction_hash(
            "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        ));
        assert!(!validate_transaction_hash("0x1234"));
    }

    #[test]
    fn test_explorer_urls() {
        assert_eq!(
            tx_url("https://sepolia.etherscan.io", "0xabc"),
            "https://sepolia.etherscan.io/tx/0xabc"
        );
        assert_eq!(
            address_url("https://etherscan.io", "0xdef"),
            "https://etherscan.io/address/0xdef"
        );
    }
}
