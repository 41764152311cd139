//! Background refresh of cached observations

use crate::cache::ObservationCache;
use crate::client::ProviderClient;
use crate::service;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periodic refresher for every city held in a cache.
///
/// Runs as a single background task, so firings never overlap each other;
/// they do run concurrently with caller-driven reads and writes on the
/// same cache. Construction starts the task and the first firing happens
/// immediately. Once stopped, a poller cannot be restarted; build a new
/// one instead.
pub struct RefreshPoller {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
    grace: Duration,
}

impl RefreshPoller {
    /// Spawn the refresh task. Must be called from within a Tokio runtime.
    pub fn start(
        client: ProviderClient,
        cache: ObservationCache,
        period: Duration,
        grace: Duration,
    ) -> Self {
        let (shutdown, mut signal) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = signal.changed() => {
                        if changed.is_err() || *signal.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        refresh_all(&client, &cache).await;
                    }
                }
            }

            debug!("Refresh poller task exiting");
        });

        info!("Refresh poller started (period: {:?})", period);

        Self {
            shutdown,
            handle,
            grace,
        }
    }

    /// Request cancellation and wait up to the grace period for an
    /// in-flight firing to finish; the task is aborted if it does not.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);

        match timeout(self.grace, &mut self.handle).await {
            Ok(_) => info!("Refresh poller stopped"),
            Err(_) => {
                warn!(
                    "Refresh poller did not stop within {:?}, aborting",
                    self.grace
                );
                self.handle.abort();
            }
        }
    }
}

/// One firing: refresh every city currently in the cache, sequentially.
///
/// A failure for one city is logged and does not abort the remaining
/// cities in this firing or cancel future firings.
async fn refresh_all(client: &ProviderClient, cache: &ObservationCache) {
    let cities = cache.keys().await;
    if cities.is_empty() {
        debug!("No cities in cache to refresh");
        return;
    }

    debug!("Starting refresh for {} cached cities", cities.len());
    for city in cities {
        match service::fetch_and_store(client, cache, &city).await {
            Ok(_) => debug!("Refreshed weather for city: {}", city),
            Err(e) => warn!("Failed to refresh weather for city {}: {}", city, e),
        }
    }
    debug!("Completed refresh for all cached cities");
}
