//! Periodic scan scheduling
//!
//! A single background task drives every scan cycle: it waits a short
//! startup delay, runs a first cycle, then runs one cycle per period. The
//! blocking directory and file I/O of a cycle runs on the blocking pool and
//! is awaited before the next tick, so cycles never overlap; a slow cycle
//! only delays the next one.

use crate::app::services::directory_scanner::DirectoryScanner;
use crate::app::services::snapshot::SnapshotStore;
use crate::config::ScanConfig;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Run one synchronous scan cycle and publish its result
///
/// When the directory cannot be listed the failure is logged and the
/// previously published snapshot stays in place. Returns the generation of
/// the published snapshot, if any.
pub fn run_scan_cycle(scanner: &DirectoryScanner, store: &SnapshotStore) -> Option<u64> {
    match scanner.scan() {
        Ok(outcome) => Some(store.publish(outcome.accounts, outcome.stats)),
        Err(e) => {
            error!("Scan error: {}", e);
            None
        }
    }
}

/// Background driver of scan cycles
#[derive(Debug, Clone)]
pub struct PeriodicScanner {
    scanner: DirectoryScanner,
    store: Arc<SnapshotStore>,
    startup_delay: Duration,
    period: Duration,
}

impl PeriodicScanner {
    /// Create a scheduler; the period must be non-zero
    pub fn new(
        scanner: DirectoryScanner,
        store: Arc<SnapshotStore>,
        startup_delay: Duration,
        period: Duration,
    ) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::configuration("Scan period must be greater than zero"));
        }

        Ok(Self {
            scanner,
            store,
            startup_delay,
            period,
        })
    }

    pub fn from_config(config: &ScanConfig, store: Arc<SnapshotStore>) -> Result<Self> {
        Self::new(
            DirectoryScanner::from_config(config),
            store,
            config.startup_delay(),
            config.period(),
        )
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Spawn the scan loop on the current runtime
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(token))
    }

    /// Scan loop; returns once `token` is cancelled
    pub async fn run(self, token: CancellationToken) {
        let first_tick = Instant::now() + self.startup_delay + self.period;

        tokio::select! {
            _ = token.cancelled() => {
                info!("Scan scheduler cancelled before first cycle");
                return;
            }
            _ = sleep(self.startup_delay) => {}
        }

        let mut ticker = interval_at(first_tick, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Scanning {} every {:?}",
            self.scanner.dir().display(),
            self.period
        );

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = token.cancelled() => {
                    info!("Scan scheduler stopped");
                    break;
                }
                _ = ticker.tick() => {}
            }
        }
    }

    /// Run one cycle on the blocking pool and wait for it to finish
    pub async fn run_cycle(&self) -> Option<u64> {
        let scanner = self.scanner.clone();
        let store = Arc::clone(&self.store);

        match tokio::task::spawn_blocking(move || run_scan_cycle(&scanner, &store)).await {
            Ok(generation) => generation,
            Err(e) => {
                error!("Scan task failed: {}", e);
                None
            }
        }
    }
}
