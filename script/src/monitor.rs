//! Sale state tracking for one wallet.
//!
//! Three polling tasks share a [`SaleSnapshot`] published on a watch channel:
//! the sale phase (presale, then public), the total supply, and the wallet's
//! public-minted count. Read failures are logged and treated as "not yet".

use allowlist_lib::{to_checksum, Address, MintView, SaleSnapshot, MAX_PUBLIC_MINT};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::PollIntervals;
use crate::contract::MintContractReader;
use crate::poller::{poll_until, PollOutcome};

/// How each of the monitor's tasks ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorReport {
    pub phase: PollOutcome,
    pub supply: PollOutcome,
    pub wallet: PollOutcome,
}

pub struct SaleMonitor<R> {
    reader: R,
    wallet: Address,
    intervals: PollIntervals,
    state: watch::Sender<SaleSnapshot>,
}

impl<R: MintContractReader> SaleMonitor<R> {
    /// `whitelisted` is the local allowlist answer for `wallet`
    pub fn new(reader: R, wallet: Address, whitelisted: bool, intervals: PollIntervals) -> Self {
        let (state, _) = watch::channel(SaleSnapshot {
            wallet_connected: true,
            whitelisted,
            ..Default::default()
        });
        Self {
            reader,
            wallet,
            intervals,
            state,
        }
    }

    /// Receiver for snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<SaleSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SaleSnapshot {
        self.state.borrow().clone()
    }

    /// Drive all tasks until each has finished. The supply task only ends on shutdown.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> MonitorReport {
        let (phase, supply, wallet) = tokio::join!(
            self.watch_phase(shutdown.clone()),
            self.watch_supply(shutdown.clone()),
            self.watch_wallet(shutdown),
        );
        info!(?phase, ?supply, ?wallet, "sale monitor stopped");
        MonitorReport {
            phase,
            supply,
            wallet,
        }
    }

    /// Presale flag first. The public flag is read on the first attempt
    /// regardless, since the public sale may already be open with presale
    /// closed; after that only while presale is on.
    async fn watch_phase(&self, shutdown: watch::Receiver<bool>) -> PollOutcome {
        let this = self;
        let mut first = true;
        poll_until(self.intervals.phase, shutdown, move || {
            let initial = std::mem::replace(&mut first, false);
            async move {
                let presale = match this.reader.is_whitelist().await {
                    Ok(flag) => flag,
                    Err(e) => {
                        warn!("failed to read presale flag: {:#}", e);
                        false
                    }
                };
                this.state
                    .send_if_modified(|s| replace(&mut s.presale_started, presale));
                if !presale && !initial {
                    return false;
                }

                let public = match this.reader.is_public().await {
                    Ok(flag) => flag,
                    Err(e) => {
                        warn!("failed to read public flag: {:#}", e);
                        false
                    }
                };
                this.state
                    .send_if_modified(|s| replace(&mut s.public_started, public));
                public
            }
        })
        .await
    }

    async fn watch_supply(&self, shutdown: watch::Receiver<bool>) -> PollOutcome {
        let this = self;
        poll_until(self.intervals.supply, shutdown, move || async move {
            match this.reader.total_supply().await {
                Ok(supply) => {
                    debug!(supply, "total supply");
                    this.state.send_if_modified(|s| replace(&mut s.total_supply, supply));
                }
                Err(e) => warn!("failed to read total supply: {:#}", e),
            }
            false
        })
        .await
    }

    /// Ends once the wallet has used up its public allowance
    async fn watch_wallet(&self, shutdown: watch::Receiver<bool>) -> PollOutcome {
        let this = self;
        poll_until(self.intervals.wallet, shutdown, move || async move {
            match this.reader.public_minted_count(&this.wallet).await {
                Ok(count) => {
                    this.state.send_if_modified(|s| replace(&mut s.minted_by_wallet, count));
                    count >= MAX_PUBLIC_MINT
                }
                Err(e) => {
                    warn!(
                        wallet = %to_checksum(&this.wallet),
                        "failed to read minted count: {:#}",
                        e
                    );
                    false
                }
            }
        })
        .await
    }
}

/// Store `value` and report whether it changed
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Log every change of the resolved [`MintView`]; returns when the monitor is dropped.
pub async fn log_view_changes(mut updates: watch::Receiver<SaleSnapshot>) {
    let mut last = None;
    loop {
        let snapshot = updates.borrow_and_update().clone();
        let view = MintView::resolve(&snapshot);
        if last != Some(view) {
            info!(
                view = ?view,
                minted = %snapshot.minted_progress(),
                by_wallet = snapshot.minted_by_wallet,
                "{}",
                view.describe()
            );
            last = Some(view);
        }
        if updates.changed().await.is_err() {
            return;
        }
    }
}
