//! Mint page decision logic: pricing, the amount stepper and which action
//! the page offers for a given sale state.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::{AllowlistError, AllowlistResult};

/// Price of one token: 0.01 ether
pub const MINT_PRICE_WEI: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Maximum tokens one wallet may mint in the public sale
pub const MAX_PUBLIC_MINT: u64 = 5;

/// Number of tokens in the collection
pub const COLLECTION_SIZE: u64 = 111;

/// Payment for a public mint of `amount` tokens
pub fn public_mint_value(amount: u64) -> AllowlistResult<U256> {
    if amount == 0 || amount > MAX_PUBLIC_MINT {
        return Err(AllowlistError::InvalidMintAmount {
            amount,
            max: MAX_PUBLIC_MINT,
        });
    }
    Ok(MINT_PRICE_WEI * U256::from(amount))
}

/// Payment for an allowlist mint (always a single token)
pub fn whitelist_mint_value() -> U256 {
    MINT_PRICE_WEI
}

/// Amount selector for the public mint, bounded to `1..=MAX_PUBLIC_MINT`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintAmount(u64);

impl MintAmount {
    pub fn new(amount: u64) -> AllowlistResult<Self> {
        public_mint_value(amount)?;
        Ok(Self(amount))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Step up by one; stepping past the wallet limit is an error
    pub fn increment(&mut self) -> AllowlistResult<()> {
        if self.0 >= MAX_PUBLIC_MINT {
            return Err(AllowlistError::InvalidMintAmount {
                amount: self.0 + 1,
                max: MAX_PUBLIC_MINT,
            });
        }
        self.0 += 1;
        Ok(())
    }

    /// Step down by one, stopping at 1
    pub fn decrement(&mut self) {
        if self.0 > 1 {
            self.0 -= 1;
        }
    }

    pub fn value(self) -> U256 {
        MINT_PRICE_WEI * U256::from(self.0)
    }
}

impl Default for MintAmount {
    fn default() -> Self {
        Self(1)
    }
}

/// Everything the page knows about the sale at one moment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSnapshot {
    pub wallet_connected: bool,
    /// A mint transaction is waiting to be mined
    pub pending: bool,
    pub presale_started: bool,
    pub public_started: bool,
    pub whitelisted: bool,
    pub minted_by_wallet: u64,
    pub total_supply: u64,
}

impl SaleSnapshot {
    /// Minted count as shown to users: the contract's supply counter is one ahead
    pub fn tokens_minted(&self) -> u64 {
        self.total_supply.saturating_sub(1)
    }

    /// "minted/collection size", the counter shown under the mint button
    pub fn minted_progress(&self) -> String {
        format!("{}/{}", self.tokens_minted(), COLLECTION_SIZE)
    }

    pub fn limit_reached(&self) -> bool {
        self.minted_by_wallet >= MAX_PUBLIC_MINT
    }
}

/// Action the page offers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintView {
    ConnectWallet,
    Pending,
    LimitReached,
    PublicMint,
    NotStarted,
    WhitelistMint,
    NotWhitelisted,
}

impl MintView {
    /// Pick the view for a snapshot; earlier checks take precedence
    pub fn resolve(snapshot: &SaleSnapshot) -> Self {
        if !snapshot.wallet_connected {
            MintView::ConnectWallet
        } else if snapshot.pending {
            MintView::Pending
        } else if snapshot.limit_reached() {
            MintView::LimitReached
        } else if snapshot.public_started {
            MintView::PublicMint
        } else if !snapshot.presale_started {
            MintView::NotStarted
        } else if snapshot.whitelisted {
            MintView::WhitelistMint
        } else {
            MintView::NotWhitelisted
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            MintView::ConnectWallet => "wallet not connected",
            MintView::Pending => "waiting for mint transaction",
            MintView::LimitReached => "wallet has minted the maximum amount",
            MintView::PublicMint => "public mint open",
            MintView::NotStarted => "minting period has not started",
            MintView::WhitelistMint => "allowlist mint open for this wallet",
            MintView::NotWhitelisted => "wallet is not on the allowlist, wait for public mint",
        }
    }
}
