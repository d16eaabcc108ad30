use tracing::debug;

use crate::address::{encode_hash, to_checksum};
use crate::error::{AllowlistError, AllowlistResult};
use crate::hashing::{hash_pair, leaf_hash};
use crate::types::{Address, MembershipProof, H256};

/// Merkle tree over a fixed allowlist.
///
/// Leaves keep the order (and duplicates) of the input list. Each parent is
/// `hash_pair` of two adjacent nodes; an unpaired last node is carried up to
/// the next level unchanged. The tree is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowlistTree {
    /// Level 0 holds the leaves, the last level holds only the root
    levels: Vec<Vec<H256>>,
}

impl AllowlistTree {
    /// Build the tree from the allowlisted accounts
    pub fn new(addresses: &[Address]) -> AllowlistResult<Self> {
        Self::from_leaves(addresses.iter().map(leaf_hash).collect())
    }

    /// Build the tree from pre-computed leaf hashes
    pub fn from_leaves(leaves: Vec<H256>) -> AllowlistResult<Self> {
        if leaves.is_empty() {
            return Err(AllowlistError::Configuration(
                "allowlist is empty".to_string(),
            ));
        }

        let mut levels = vec![leaves];
        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<H256> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    // unpaired last node
                    _ => pair[0],
                })
                .collect();
            levels.push(next);
        }

        let tree = Self { levels };
        debug!(
            leaves = tree.len(),
            depth = tree.depth(),
            root = %encode_hash(&tree.root()),
            "built allowlist tree"
        );
        Ok(tree)
    }

    /// Get the root hash
    pub fn root(&self) -> H256 {
        self.levels[self.levels.len() - 1][0]
    }

    /// Get all leaf hashes, in allowlist order
    pub fn leaves(&self) -> &[H256] {
        &self.levels[0]
    }

    /// Number of leaves, duplicates included
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Always false: an empty allowlist is rejected at construction
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Number of levels above the leaves
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Get all nodes at a specific level (0 = leaves)
    pub fn level(&self, level: usize) -> Option<&[H256]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Index of the first leaf equal to `leaf_hash(address)`
    pub fn leaf_index(&self, address: &Address) -> Option<usize> {
        let leaf = leaf_hash(address);
        self.leaves().iter().position(|candidate| *candidate == leaf)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.leaf_index(address).is_some()
    }

    /// Sibling hashes from the leaf at `index` up to the root.
    ///
    /// Levels where the node was carried up unpaired contribute nothing.
    pub fn proof_at(&self, index: usize) -> AllowlistResult<Vec<H256>> {
        if index >= self.len() {
            return Err(AllowlistError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut position = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = position ^ 1;
            if let Some(hash) = level.get(sibling) {
                siblings.push(*hash);
            }
            position /= 2;
        }

        Ok(siblings)
    }

    /// Produce the inclusion proof for `address`.
    ///
    /// With duplicate entries the first occurrence is used.
    pub fn prove_membership(&self, address: &Address) -> AllowlistResult<MembershipProof> {
        let leaf_index = self
            .leaf_index(address)
            .ok_or_else(|| AllowlistError::NotFound {
                address: to_checksum(address),
            })?;

        Ok(MembershipProof {
            address: *address,
            leaf: self.levels[0][leaf_index],
            leaf_index,
            siblings: self.proof_at(leaf_index)?,
        })
    }
}
