//! Cancellable periodic checks that stop once their condition holds.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// How a polling task ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The check returned true on attempt number `attempts`
    Satisfied { attempts: u64 },
    /// Shutdown was signalled (or its sender dropped) after `attempts` checks
    Cancelled { attempts: u64 },
}

/// Run `check` now and then every `period` until it returns true or
/// `shutdown` turns true. A check already in flight is allowed to finish.
pub async fn poll_until<F, Fut>(
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut check: F,
) -> PollOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut attempts = 0;

    loop {
        if *shutdown.borrow() {
            return PollOutcome::Cancelled { attempts };
        }

        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return PollOutcome::Cancelled { attempts };
                }
                continue;
            }
        }

        attempts += 1;
        if check().await {
            return PollOutcome::Satisfied { attempts };
        }
    }
}

/// Turn a stop signal (Ctrl-C) into `true` on `shutdown`.
///
/// If the signal cannot be listened for, the sender is held open forever: a
/// dropped sender reads as cancellation to `poll_until`, and the tasks must
/// keep running.
pub async fn forward_shutdown<F, E>(signal: F, shutdown: watch::Sender<bool>)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match signal.await {
        Ok(()) => {
            info!("Shutting down...");
            let _ = shutdown.send(true);
        }
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
            drop(shutdown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_check_runs_immediately() {
        let (_tx, rx) = watch::channel(false);
        let outcome = poll_until(Duration::from_secs(5), rx, || async { true }).await;
        assert_eq!(outcome, PollOutcome::Satisfied { attempts: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_condition_holds() {
        let (_tx, rx) = watch::channel(false);
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();

        let started = tokio::time::Instant::now();
        let outcome = poll_until(Duration::from_secs(2), rx, move || {
            let counter = counter.clone();
            async move { counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3 }
        })
        .await;

        assert_eq!(outcome, PollOutcome::Satisfied { attempts: 3 });
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels() {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(poll_until(Duration::from_secs(5), rx, || async { false }));

        tokio::time::sleep(Duration::from_secs(12)).await;
        tx.send(true).unwrap();

        let outcome = task.await.unwrap();
        assert_eq!(outcome, PollOutcome::Cancelled { attempts: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled() {
        let (_tx, rx) = watch::channel(true);
        let outcome = poll_until(Duration::from_secs(1), rx, || async { true }).await;
        assert_eq!(outcome, PollOutcome::Cancelled { attempts: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_cancels() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let outcome = poll_until(Duration::from_secs(1), rx, || async { false }).await;
        // The immediate tick may race the closed channel; either way no more than one check runs
        match outcome {
            PollOutcome::Cancelled { attempts } => assert!(attempts <= 1),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_forwards_shutdown() {
        let (tx, mut rx) = watch::channel(false);
        tokio::spawn(forward_shutdown(async { Ok::<(), std::io::Error>(()) }, tx));

        rx.changed().await.unwrap();
        assert!(*rx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_failure_keeps_tasks_running() {
        let (tx, rx) = watch::channel(false);
        let listener = tokio::spawn(forward_shutdown(
            async { Err::<(), _>(std::io::Error::other("no signal handler")) },
            tx,
        ));

        let outcome = poll_until(Duration::from_secs(5), rx.clone(), || async { false });
        let outcome = tokio::time::timeout(Duration::from_secs(60), outcome).await;
        assert!(outcome.is_err(), "polling stopped: {:?}", outcome);

        assert!(!rx.has_changed().unwrap());
        assert!(!*rx.borrow());
        assert!(!listener.is_finished());
    }
}
