//! Error types for allowlist operations

use thiserror::Error;

/// Errors raised while building or querying the allowlist index
#[derive(Debug, Error)]
pub enum AllowlistError {
    /// The allowlist is empty or contains a malformed entry. Not recoverable.
    #[error("Invalid allowlist configuration: {0}")]
    Configuration(String),

    /// An address string could not be parsed
    #[error("Invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// A hash string could not be parsed
    #[error("Invalid hash {input:?}: {reason}")]
    InvalidHash { input: String, reason: String },

    /// The queried account has no leaf in the tree
    #[error("Address {address} is not on the allowlist")]
    NotFound { address: String },

    /// Leaf index outside the tree
    #[error("Leaf index {index} out of bounds (num leaves: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Requested mint amount is outside the accepted range
    #[error("Mint amount {amount} must be between 1 and {max}")]
    InvalidMintAmount { amount: u64, max: u64 },

    /// Contract return data could not be decoded
    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

/// Result type for allowlist operations
pub type AllowlistResult<T> = Result<T, AllowlistError>;
