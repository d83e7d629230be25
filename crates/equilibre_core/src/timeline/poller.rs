//! Fixed-interval refresh loop bound to an active view.
//!
//! # Invariants
//! - First refresh runs immediately on activation.
//! - After `deactivate()` returns, no further refresh starts.
//! - Dropping the handle cancels the loop as well.

use crate::store::RecordStore;
use crate::timeline::aggregator::TimelineAggregator;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Starts polling `aggregator` on its configured interval.
///
/// Must be called from within a tokio runtime.
pub fn start_polling<S>(aggregator: &Arc<TimelineAggregator<S>>) -> PollingHandle
where
    S: RecordStore + 'static,
{
    let period = aggregator.config().poll_interval().max(MIN_POLL_INTERVAL);
    let (shutdown, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run_poll_loop(Arc::clone(aggregator), period, shutdown_rx));

    PollingHandle {
        shutdown,
        task: Some(task),
    }
}

/// Owner of one recurring refresh loop.
pub struct PollingHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollingHandle {
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the loop and waits for it to exit.
    ///
    /// An in-flight refresh is allowed to finish; reads have no side effects.
    pub async fn deactivate(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("event=timeline_poll module=timeline status=error error={err}");
            }
        }
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.shutdown.send(true);
            task.abort();
        }
    }
}

async fn run_poll_loop<S>(
    aggregator: Arc<TimelineAggregator<S>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    S: RecordStore + 'static,
{
    info!(
        "event=timeline_poll module=timeline status=start interval_ms={}",
        period.as_millis()
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut refreshes: u64 = 0;

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                aggregator.refresh().await;
                refreshes += 1;
            }
        }
    }

    info!("event=timeline_poll module=timeline status=stop refreshes={refreshes}");
}
