use std::{collections::HashSet, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use crate::{
    metrics::{RIDDLE_CACHE_ENTRIES, RIDDLE_CACHE_EVICTIONS_TOTAL},
    models::Riddle,
};

/// Slot every fetch writes to. Riddles are not generated per user.
pub const SHARED_CACHE_KEY: &str = "riddles";
pub const STALENESS_THRESHOLD: Duration = Duration::from_secs(15 * 60);
pub const SWEEP_PERIOD: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct RiddleCacheEntry {
    pub riddles: HashSet<Riddle>,
    pub last_updated: DateTime<Utc>,
}

/// Concurrent riddle table. Entries are replaced whole on `put` and
/// expire through `sweep`; there is no manual delete.
#[derive(Debug, Default)]
pub struct RiddleCache {
    entries: DashMap<String, RiddleCacheEntry>,
}

impl RiddleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entry for `key`, stamped with the current time.
    pub fn put(&self, key: &str, riddles: HashSet<Riddle>) {
        self.put_at(key, riddles, Utc::now());
    }

    /// Replaces the entry for `key` with an explicit timestamp.
    pub fn put_at(&self, key: &str, riddles: HashSet<Riddle>, last_updated: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            RiddleCacheEntry {
                riddles,
                last_updated,
            },
        );
        RIDDLE_CACHE_ENTRIES.set(self.entries.len() as i64);
    }

    pub fn get(&self, key: &str) -> Option<RiddleCacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry last updated strictly before `now - threshold`.
    /// Returns the number of evicted entries.
    pub fn sweep(&self, now: DateTime<Utc>, threshold: Duration) -> usize {
        let Some(cutoff) = TimeDelta::from_std(threshold)
            .ok()
            .and_then(|delta| now.checked_sub_signed(delta))
        else {
            return 0;
        };

        let mut evicted = 0;
        self.entries.retain(|key, entry| {
            let stale = entry.last_updated < cutoff;
            if stale {
                tracing::debug!(
                    key = %key,
                    last_updated = %entry.last_updated,
                    "Evicting stale riddles"
                );
                evicted += 1;
            }
            !stale
        });

        RIDDLE_CACHE_EVICTIONS_TOTAL.inc_by(evicted as u64);
        RIDDLE_CACHE_ENTRIES.set(self.entries.len() as i64);
        evicted
    }
}
