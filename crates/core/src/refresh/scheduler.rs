//! Periodic background refresh.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::service::{RefreshOutcome, RefreshServiceTrait};

/// Owned handle to a running periodic refresh.
///
/// Cancelling (or dropping) the handle stops the timer. A refresh that is
/// already running is allowed to finish.
pub struct ScheduledRefresh {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ScheduledRefresh {
    /// Start refreshing immediately, then every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(service: Arc<dyn RefreshServiceTrait>, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            info!("Market refresh scheduler started ({:?} interval)", period);
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        match service.refresh().await {
                            RefreshOutcome::AlreadyInFlight => {
                                debug!("Scheduled refresh skipped: refresh already in flight");
                            }
                            outcome => debug!("Scheduled refresh finished: {:?}", outcome),
                        }
                    }
                }
            }

            info!("Market refresh scheduler stopped");
        });

        Self {
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// Stop the timer. Safe to call more than once.
    pub fn cancel(&mut self) {
        self.signal_shutdown();
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ScheduledRefresh {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}
