//! Sale watcher for one wallet
//!
//! Mirrors what the mint page shows: connects to the source chain, resolves
//! whether the wallet is allowlisted, then follows the sale flags, the total
//! supply and the wallet's minted count until Ctrl-C.
//!
//! Usage:
//! RUST_LOG=info cargo run --bin watcher

use allowlist_lib::{encode_hash, to_checksum};
use allowlist_script::logging::setup_logger;
use allowlist_script::{
    build_checked_tree, forward_shutdown, log_view_changes, RpcMintContract, SaleMonitor,
    WatcherArgs, WatcherConfig,
};
use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();
    dotenv::dotenv().ok();

    let config = WatcherConfig::from_args(WatcherArgs::parse())?;

    info!("Starting sale watcher...");
    info!("Contract: {}", to_checksum(&config.contract));
    info!("Wallet: {}", to_checksum(&config.wallet));

    let tree = build_checked_tree(&config.allowlist, config.expected_root.as_ref())?;
    let whitelisted = match tree.prove_membership(&config.wallet) {
        Ok(proof) => {
            info!(
                leaf_index = proof.leaf_index,
                root = %encode_hash(&tree.root()),
                "wallet is allowlisted"
            );
            true
        }
        Err(e) => {
            info!("{}", e);
            false
        }
    };

    let provider = ProviderBuilder::new().on_http(config.rpc_url.clone());
    let chain_id = provider
        .get_chain_id()
        .await
        .context("Failed to read chain id")?;
    if chain_id != config.chain_id {
        bail!(
            "Connected to chain {} but the collection lives on chain {}",
            chain_id,
            config.chain_id
        );
    }

    let reader = RpcMintContract::new(provider, &config.contract);
    let monitor = SaleMonitor::new(reader, config.wallet, whitelisted, config.intervals);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(forward_shutdown(signal::ctrl_c(), shutdown_tx));

    let updates = monitor.subscribe();
    tokio::select! {
        report = monitor.run(shutdown_rx) => {
            info!(?report, "Watcher stopped");
        }
        _ = log_view_changes(updates) => {}
    }

    Ok(())
}
