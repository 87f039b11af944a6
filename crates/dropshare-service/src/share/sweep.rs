//! Periodic sweep of expired share links.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::manager::ShareLinkManager;

/// Spawns a background task that periodically purges expired links.
///
/// The sweep is an optimization only; resolution rejects expired tokens
/// regardless of whether the sweeper has run. The task exits when `true`
/// is observed on the shutdown channel or the sender is dropped.
pub fn spawn_sweeper(
    manager: Arc<ShareLinkManager>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    manager.purge_expired().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Share link sweeper stopped");
    })
}
