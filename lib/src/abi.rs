//! Calldata for the collection contract's entry points.

use alloy_primitives::{FixedBytes, U256};
use alloy_sol_types::SolCall;

use crate::error::AllowlistResult;
use crate::mint::{whitelist_mint_value, MintAmount};
use crate::types::{Address, MembershipProof};
use crate::IAllowlistMint;

/// A payable contract call: calldata plus the wei attached to it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintRequest {
    pub calldata: Vec<u8>,
    pub value: U256,
}

/// `whitelistMint(proof)` paying for one token
pub fn whitelist_mint_request(proof: &MembershipProof) -> MintRequest {
    let call = IAllowlistMint::whitelistMintCall {
        proof: proof.siblings.iter().copied().map(FixedBytes::from).collect(),
    };
    MintRequest {
        calldata: call.abi_encode(),
        value: whitelist_mint_value(),
    }
}

/// `publicMint(amount)` paying for `amount` tokens
pub fn public_mint_request(amount: MintAmount) -> MintRequest {
    let call = IAllowlistMint::publicMintCall {
        amount: U256::from(amount.get()),
    };
    MintRequest {
        calldata: call.abi_encode(),
        value: amount.value(),
    }
}

pub fn is_whitelist_calldata() -> Vec<u8> {
    IAllowlistMint::isWhitelistCall {}.abi_encode()
}

pub fn is_public_calldata() -> Vec<u8> {
    IAllowlistMint::isPublicCall {}.abi_encode()
}

pub fn public_minted_count_calldata(owner: &Address) -> Vec<u8> {
    IAllowlistMint::publicMintedCountCall {
        owner: alloy_primitives::Address::from(*owner),
    }
    .abi_encode()
}

pub fn total_supply_calldata() -> Vec<u8> {
    IAllowlistMint::totalSupplyCall {}.abi_encode()
}

pub fn decode_is_whitelist(data: &[u8]) -> AllowlistResult<bool> {
    Ok(IAllowlistMint::isWhitelistCall::abi_decode_returns(data)?)
}

pub fn decode_is_public(data: &[u8]) -> AllowlistResult<bool> {
    Ok(IAllowlistMint::isPublicCall::abi_decode_returns(data)?)
}

pub fn decode_public_minted_count(data: &[u8]) -> AllowlistResult<U256> {
    Ok(IAllowlistMint::publicMintedCountCall::abi_decode_returns(data)?)
}

pub fn decode_total_supply(data: &[u8]) -> AllowlistResult<U256> {
    Ok(IAllowlistMint::totalSupplyCall::abi_decode_returns(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::public_mint_value;
    use crate::tree::AllowlistTree;

    fn word(value: u64) -> Vec<u8> {
        let mut out = vec![0u8; 32];
        out[24..].copy_from_slice(&value.to_be_bytes());
        out
    }

    #[test]
    fn test_selectors() {
        assert_eq!(is_whitelist_calldata(), hex::decode("4146ed0a").unwrap());
        assert_eq!(is_public_calldata(), hex::decode("dc9a1535").unwrap());
        assert_eq!(total_supply_calldata(), hex::decode("18160ddd").unwrap());
        assert_eq!(
            &public_minted_count_calldata(&[0u8; 20])[..4],
            &hex::decode("34c48943").unwrap()[..]
        );
    }

    #[test]
    fn test_public_minted_count_encodes_owner() {
        let owner = [0x11u8; 20];
        let calldata = public_minted_count_calldata(&owner);
        assert_eq!(calldata.len(), 4 + 32);
        assert_eq!(&calldata[4..16], &[0u8; 12]);
        assert_eq!(&calldata[16..], &owner);
    }

    #[test]
    fn test_whitelist_mint_request_layout() {
        let list: Vec<Address> = (1..=4u8).map(|i| [i; 20]).collect();
        let tree = AllowlistTree::new(&list).unwrap();
        let proof = tree.prove_membership(&list[0]).unwrap();
        let request = whitelist_mint_request(&proof);

        assert_eq!(&request.calldata[..4], &hex::decode("372f657c").unwrap()[..]);
        // offset, length, then one word per sibling
        assert_eq!(request.calldata.len(), 4 + 32 * (2 + proof.siblings.len()));
        assert_eq!(&request.calldata[4..36], &word(32)[..]);
        assert_eq!(&request.calldata[36..68], &word(proof.siblings.len() as u64)[..]);
        assert_eq!(&request.calldata[68..100], &proof.siblings[0][..]);
        assert_eq!(request.value, whitelist_mint_value());
    }

    #[test]
    fn test_public_mint_request() {
        let request = public_mint_request(MintAmount::new(3).unwrap());
        assert_eq!(&request.calldata[..4], &hex::decode("2db11544").unwrap()[..]);
        assert_eq!(&request.calldata[4..], &word(3)[..]);
        assert_eq!(request.value, public_mint_value(3).unwrap());
    }

    #[test]
    fn test_public_mint_request_from_stepper() {
        let mut amount = MintAmount::default();
        amount.increment().unwrap();
        let request = public_mint_request(amount);
        assert_eq!(&request.calldata[4..], &word(2)[..]);
        assert_eq!(request.value, public_mint_value(2).unwrap());
        assert!(MintAmount::new(6).is_err());
    }

    #[test]
    fn test_decode_returns() {
        assert!(decode_is_whitelist(&word(1)).unwrap());
        assert!(!decode_is_public(&word(0)).unwrap());
        assert_eq!(decode_total_supply(&word(42)).unwrap(), U256::from(42));
        assert_eq!(decode_public_minted_count(&word(5)).unwrap(), U256::from(5));
    }

    #[test]
    fn test_decode_short_data_fails() {
        assert!(decode_is_whitelist(&[0u8; 4]).is_err());
    }
}
