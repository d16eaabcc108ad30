//! Read access to the collection contract.

use allowlist_lib::{
    decode_is_public, decode_is_whitelist, decode_public_minted_count, decode_total_supply,
    is_public_calldata, is_whitelist_calldata, public_minted_count_calldata,
    total_supply_calldata, Address,
};
use alloy::primitives::{Bytes, TxKind};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use alloy::transports::http::{Client, Http};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

/// The view methods the mint page reads from the contract
#[async_trait]
pub trait MintContractReader: Send + Sync {
    /// Whether the allowlist (presale) mint is open
    async fn is_whitelist(&self) -> Result<bool>;

    /// Whether the public mint is open
    async fn is_public(&self) -> Result<bool>;

    /// Tokens `owner` has minted in the public sale
    async fn public_minted_count(&self, owner: &Address) -> Result<u64>;

    async fn total_supply(&self) -> Result<u64>;
}

/// [`MintContractReader`] backed by `eth_call` over an HTTP provider
pub struct RpcMintContract<P> {
    provider: P,
    address: alloy::primitives::Address,
}

impl<P> RpcMintContract<P>
where
    P: Provider<Http<Client>>,
{
    pub fn new(provider: P, address: &Address) -> Self {
        Self {
            provider,
            address: alloy::primitives::Address::from(*address),
        }
    }

    async fn call(&self, method: &str, calldata: Vec<u8>) -> Result<Vec<u8>> {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(self.address)),
            input: TransactionInput::new(Bytes::from(calldata)),
            ..Default::default()
        };
        let output = self
            .provider
            .call(&tx)
            .await
            .with_context(|| format!("eth_call {} failed", method))?;
        Ok(output.to_vec())
    }
}

#[async_trait]
impl<P> MintContractReader for RpcMintContract<P>
where
    P: Provider<Http<Client>>,
{
    async fn is_whitelist(&self) -> Result<bool> {
        let data = self.call("isWhitelist", is_whitelist_calldata()).await?;
        Ok(decode_is_whitelist(&data)?)
    }

    async fn is_public(&self) -> Result<bool> {
        let data = self.call("isPublic", is_public_calldata()).await?;
        Ok(decode_is_public(&data)?)
    }

    async fn public_minted_count(&self, owner: &Address) -> Result<u64> {
        let data = self
            .call("publicMintedCount", public_minted_count_calldata(owner))
            .await?;
        let count = decode_public_minted_count(&data)?;
        u64::try_from(count).map_err(|_| anyhow!("publicMintedCount {} does not fit in u64", count))
    }

    async fn total_supply(&self) -> Result<u64> {
        let data = self.call("totalSupply", total_supply_calldata()).await?;
        let supply = decode_total_supply(&data)?;
        u64::try_from(supply).map_err(|_| anyhow!("totalSupply {} does not fit in u64", supply))
    }
}
