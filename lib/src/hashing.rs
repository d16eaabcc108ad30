use sha3::{Digest, Keccak256};

use crate::types::{Address, H256};

/// Compute Keccak256 hash
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Leaf for one account: keccak256 of its 20 raw bytes, no salt.
pub fn leaf_hash(address: &Address) -> H256 {
    keccak256(address)
}

/// Hash two nodes in ascending byte order, so `hash_pair(a, b) == hash_pair(b, a)`.
pub fn hash_pair(a: &H256, b: &H256) -> H256 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    Keccak256::new()
        .chain_update(first)
        .chain_update(second)
        .finalize()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        assert_eq!(
            hex::encode(keccak256(b"hello")),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_leaf_hash_uses_raw_bytes() {
        let address = [0x11u8; 20];
        assert_eq!(leaf_hash(&address), keccak256(&address));
        // Not the hash of the hex text
        assert_ne!(leaf_hash(&address), keccak256(hex::encode(address).as_bytes()));
    }

    #[test]
    fn test_hash_pair_is_commutative() {
        let a = keccak256(b"left");
        let b = keccak256(b"right");
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_pair_sorts_before_hashing() {
        let low = [0x01u8; 32];
        let high = [0xffu8; 32];

        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(&low);
        concat.extend_from_slice(&high);

        assert_eq!(hash_pair(&high, &low), keccak256(&concat));
    }

    #[test]
    fn test_hash_pair_equal_children() {
        let node = [0x42u8; 32];
        let mut concat = node.to_vec();
        concat.extend_from_slice(&node);
        assert_eq!(hash_pair(&node, &node), keccak256(&concat));
    }
}
