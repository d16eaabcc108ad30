use serde::{Deserialize, Serialize};

use crate::address::{encode_hash, to_checksum};

/// 32-byte hash type
pub type H256 = [u8; 32];

/// 20-byte account identifier
pub type Address = [u8; 20];

/// Inclusion proof for one allowlisted account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipProof {
    pub address: Address,
    pub leaf: H256,
    /// Position of the first leaf matching `address`
    pub leaf_index: usize,
    /// Sibling hashes ordered from the leaf level up to the root
    pub siblings: Vec<H256>,
}

/// JSON form of a [`MembershipProof`], as handed to the mint call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofOutput {
    pub root: String,
    pub address: String,
    pub leaf: String,
    pub leaf_index: usize,
    pub proof: Vec<String>,
}

impl ProofOutput {
    pub fn new(root: &H256, proof: &MembershipProof) -> Self {
        Self {
            root: encode_hash(root),
            address: to_checksum(&proof.address),
            leaf: encode_hash(&proof.leaf),
            leaf_index: proof.leaf_index,
            proof: proof.siblings.iter().map(encode_hash).collect(),
        }
    }
}
