//! Published snapshot of the account model
//!
//! The scanning task builds a complete model privately and hands it over in
//! one [`SnapshotStore::publish`] call. Readers clone the current
//! `Arc<Snapshot>` and keep a consistent view for as long as they hold it;
//! a publish never mutates a snapshot a reader may be looking at.

use crate::app::models::{Account, Strategy};
use crate::app::services::record_parser::ParseStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Immutable result of one successful scan cycle
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    generation: u64,
    published_at: Option<DateTime<Utc>>,
    accounts: HashMap<String, Account>,
    stats: ParseStats,
}

impl Snapshot {
    /// Publish counter; 0 for the empty snapshot present before any scan
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// All accounts, in no particular order
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    pub fn account(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// All strategies of all accounts, in no particular order
    pub fn strategies(&self) -> Vec<&Strategy> {
        self.accounts
            .values()
            .flat_map(|account| account.strategies.values())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Holder of the most recently published snapshot
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot handle
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Replace the published snapshot with a newly built account mapping
    ///
    /// Returns the generation of the new snapshot.
    pub fn publish(&self, accounts: HashMap<String, Account>, stats: ParseStats) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());

        let generation = guard.generation + 1;
        let account_count = accounts.len();
        *guard = Arc::new(Snapshot {
            generation,
            published_at: Some(Utc::now()),
            accounts,
            stats,
        });
        drop(guard);

        info!(
            "Published snapshot {} with {} accounts",
            generation, account_count
        );
        generation
    }

    /// Get all current accounts, in no particular order
    pub fn accounts(&self) -> Vec<Account> {
        self.snapshot().accounts.values().cloned().collect()
    }

    /// Get all current strategies, in no particular order
    pub fn strategies(&self) -> Vec<Strategy> {
        self.snapshot()
            .strategies()
            .into_iter()
            .cloned()
            .collect()
    }
}
