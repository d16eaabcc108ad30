//! Host-side tooling for the allowlist mint: configuration, the contract
//! reader seam and the polling tasks that follow the sale state.

pub mod config;
pub mod contract;
pub mod index;
pub mod logging;
pub mod monitor;
pub mod poller;

pub use config::{PollIntervals, WatcherArgs, WatcherConfig};
pub use contract::{MintContractReader, RpcMintContract};
pub use index::{build_checked_tree, write_file_atomic};
pub use monitor::{log_view_changes, MonitorReport, SaleMonitor};
pub use poller::{forward_shutdown, poll_until, PollOutcome};
