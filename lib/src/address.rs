//! Hex encoding helpers for account identifiers and hashes.
//!
//! Addresses are accepted in any single letter case. Mixed-case input is taken
//! to be EIP-55 checksummed and is rejected when the checksum does not match.

use crate::error::{AllowlistError, AllowlistResult};
use crate::hashing::keccak256;
use crate::types::{Address, H256};

/// Parse a 20-byte address from a hex string, with or without "0x" prefix.
pub fn parse_address(input: &str) -> AllowlistResult<Address> {
    let trimmed = input.trim();
    let digits = strip_hex_prefix(trimmed);
    let invalid = |reason: String| AllowlistError::InvalidAddress {
        input: trimmed.to_string(),
        reason,
    };

    if digits.len() != 40 {
        return Err(invalid(format!(
            "expected 40 hex chars, got {}",
            digits.len()
        )));
    }

    let mut address = [0u8; 20];
    hex::decode_to_slice(digits, &mut address).map_err(|e| invalid(e.to_string()))?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && checksum_digits(&address) != digits {
        return Err(invalid("checksum mismatch".to_string()));
    }

    Ok(address)
}

/// EIP-55 checksummed rendering, "0x" prefixed.
pub fn to_checksum(address: &Address) -> String {
    format!("0x{}", checksum_digits(address))
}

fn checksum_digits(address: &Address) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = (hash[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// Encode a hash as "0x" prefixed lowercase hex
pub fn encode_hash(hash: &H256) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a 32-byte hash from a hex string, with or without "0x" prefix
pub fn parse_hash(input: &str) -> AllowlistResult<H256> {
    let trimmed = input.trim();
    let mut hash = [0u8; 32];
    hex::decode_to_slice(strip_hex_prefix(trimmed), &mut hash).map_err(|e| {
        AllowlistError::InvalidHash {
            input: trimmed.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(hash)
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
