use std::path::PathBuf;
use std::time::Duration;

use allowlist_lib::{load_allowlist, parse_address, parse_hash, Address, H256};
use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

/// Goerli, the network the collection was deployed to
pub const DEFAULT_CHAIN_ID: u64 = 5;

/// The arguments for the watcher. Each one falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "watcher", about = "Follow the sale state of the collection contract", version)]
pub struct WatcherArgs {
    /// JSON-RPC endpoint of the chain the contract lives on
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Url,

    /// Address of the collection contract
    #[arg(long, env = "NFT_CONTRACT_ADDRESS")]
    pub contract: String,

    /// Account whose mint options are followed
    #[arg(long, env = "WALLET_ADDRESS")]
    pub wallet: String,

    /// Allowlist file (JSON array or one address per line)
    #[arg(long, env = "ALLOWLIST_PATH")]
    pub allowlist: PathBuf,

    /// Root the contract was deployed with
    #[arg(long, env = "EXPECTED_ROOT")]
    pub expected_root: Option<String>,

    #[arg(long, env = "CHAIN_ID", default_value_t = DEFAULT_CHAIN_ID)]
    pub chain_id: u64,

    /// Seconds between sale flag and supply reads
    #[arg(long, env = "PHASE_POLL_SECS", default_value_t = 5)]
    pub phase_poll_secs: u64,

    /// Seconds between reads of the wallet's minted count
    #[arg(long, env = "WALLET_POLL_SECS", default_value_t = 2)]
    pub wallet_poll_secs: u64,
}

/// Periods of the sale polling tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollIntervals {
    pub phase: Duration,
    pub supply: Duration,
    pub wallet: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            phase: Duration::from_secs(5),
            supply: Duration::from_secs(5),
            wallet: Duration::from_secs(2),
        }
    }
}

/// Validated watcher configuration
#[derive(Clone, Debug)]
pub struct WatcherConfig {
    pub rpc_url: Url,
    pub contract: Address,
    pub wallet: Address,
    pub allowlist: Vec<Address>,
    pub expected_root: Option<H256>,
    pub chain_id: u64,
    pub intervals: PollIntervals,
}

impl WatcherConfig {
    pub fn from_args(args: WatcherArgs) -> Result<Self> {
        let contract = parse_address(&args.contract).context("Invalid contract address")?;
        let wallet = parse_address(&args.wallet).context("Invalid wallet address")?;
        let allowlist = load_allowlist(&args.allowlist).context("Failed to load allowlist")?;
        let expected_root = args
            .expected_root
            .as_deref()
            .map(parse_hash)
            .transpose()
            .context("Invalid expected root")?;

        anyhow::ensure!(args.phase_poll_secs > 0, "PHASE_POLL_SECS must be positive");
        anyhow::ensure!(args.wallet_poll_secs > 0, "WALLET_POLL_SECS must be positive");

        Ok(Self {
            rpc_url: args.rpc_url,
            contract,
            wallet,
            allowlist,
            expected_root,
            chain_id: args.chain_id,
            intervals: PollIntervals {
                phase: Duration::from_secs(args.phase_poll_secs),
                supply: Duration::from_secs(args.phase_poll_secs),
                wallet: Duration::from_secs(args.wallet_poll_secs),
            },
        })
    }
}
