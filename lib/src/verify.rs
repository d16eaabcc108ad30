use crate::hashing::{hash_pair, leaf_hash};
use crate::types::{Address, MembershipProof, H256};

/// Verify an allowlist inclusion proof
///
/// # Arguments
/// * `leaf` - The leaf hash being proven
/// * `proof` - Sibling hashes ordered from the leaf level up
/// * `root` - The expected root hash of the tree
///
/// # Returns
/// * `true` if folding the proof over `leaf` reproduces `root`
pub fn verify_proof(leaf: &H256, proof: &[H256], root: &H256) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling));
    computed == *root
}

/// Verify that `address` is included under `root`
pub fn verify_membership(address: &Address, proof: &[H256], root: &H256) -> bool {
    verify_proof(&leaf_hash(address), proof, root)
}

impl MembershipProof {
    /// Check this proof against a root, recomputing the leaf from the address
    pub fn verify(&self, root: &H256) -> bool {
        self.leaf == leaf_hash(&self.address) && verify_proof(&self.leaf, &self.siblings, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AllowlistTree;

    fn sample_tree() -> (Vec<Address>, AllowlistTree) {
        let list: Vec<Address> = (1..=5u8).map(|i| [i; 20]).collect();
        let tree = AllowlistTree::new(&list).unwrap();
        (list, tree)
    }

    #[test]
    fn test_verify_valid_membership() {
        let (list, tree) = sample_tree();
        let proof = tree.prove_membership(&list[3]).unwrap();
        assert!(verify_membership(&list[3], &proof.siblings, &tree.root()));
        assert!(proof.verify(&tree.root()));
    }

    #[test]
    fn test_verify_forged_proof() {
        let (list, tree) = sample_tree();
        let borrowed = tree.prove_membership(&list[0]).unwrap();
        let outsider = [0xeeu8; 20];
        assert!(!verify_membership(&outsider, &borrowed.siblings, &tree.root()));
    }

    #[test]
    fn test_verify_wrong_root() {
        let (list, tree) = sample_tree();
        let proof = tree.prove_membership(&list[1]).unwrap();
        assert!(!proof.verify(&[0u8; 32]));
    }

    #[test]
    fn test_verify_tampered_sibling() {
        let (list, tree) = sample_tree();
        let mut proof = tree.prove_membership(&list[2]).unwrap();
        proof.siblings[0][0] ^= 0x01;
        assert!(!proof.verify(&tree.root()));
    }

    #[test]
    fn test_verify_mismatched_leaf() {
        let (list, tree) = sample_tree();
        let mut proof = tree.prove_membership(&list[2]).unwrap();
        proof.address = list[4];
        assert!(!proof.verify(&tree.root()));
    }

    #[test]
    fn test_verify_empty_proof_only_matches_leaf_root() {
        let leaf = [7u8; 32];
        assert!(verify_proof(&leaf, &[], &leaf));
        assert!(!verify_proof(&leaf, &[], &[8u8; 32]));
    }
}
