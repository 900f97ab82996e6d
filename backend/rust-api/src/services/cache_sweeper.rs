use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::info;

use crate::{
    metrics::CACHE_SWEEPER_TICKS_TOTAL,
    services::riddle_cache::{RiddleCache, STALENESS_THRESHOLD, SWEEP_PERIOD},
};

/// Background worker evicting stale riddle cache entries on a fixed period.
/// The first sweep runs one period after start.
pub struct CacheSweeper {
    cache: Arc<RiddleCache>,
    period: Duration,
    threshold: Duration,
}

impl CacheSweeper {
    pub fn new(cache: Arc<RiddleCache>) -> Self {
        Self::with_schedule(cache, SWEEP_PERIOD, STALENESS_THRESHOLD)
    }

    pub fn with_schedule(cache: Arc<RiddleCache>, period: Duration, threshold: Duration) -> Self {
        Self {
            cache,
            period,
            threshold,
        }
    }

    /// Starts the sweep loop on its own task. It stops once `shutdown`
    /// carries `true` or its sender is dropped.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting riddle cache sweeper (period {}s, threshold {}s)",
            self.period.as_secs(),
            self.threshold.as_secs()
        );

        let mut ticker = interval_at(Instant::now() + self.period, self.period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Riddle cache sweeper stopped");
    }

    pub fn sweep_once(&self) -> usize {
        info!("Cleaning up riddles: {}", self.cache.len());
        let evicted = self.cache.sweep(Utc::now(), self.threshold);
        CACHE_SWEEPER_TICKS_TOTAL
            .with_label_values(&["success"])
            .inc();
        if evicted > 0 {
            info!(evicted, "Riddle cache sweep evicted stale entries");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Riddle, services::riddle_cache::SHARED_CACHE_KEY};
    use chrono::TimeDelta;
    use std::collections::HashSet;

    fn one_riddle() -> HashSet<Riddle> {
        HashSet::from([Riddle {
            id: "r1".to_string(),
            hints: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            question: "Q".to_string(),
            answer: "A".to_string(),
        }])
    }

    #[test]
    fn test_sweep_once_uses_threshold() {
        let cache = Arc::new(RiddleCache::new());
        cache.put_at("stale", one_riddle(), Utc::now() - TimeDelta::minutes(16));
        cache.put_at("fresh", one_riddle(), Utc::now() - TimeDelta::minutes(10));

        let sweeper = CacheSweeper::new(Arc::clone(&cache));
        assert_eq!(sweeper.sweep_once(), 1);
        assert!(cache.get("fresh").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_sweep_waits_one_period() {
        let cache = Arc::new(RiddleCache::new());
        cache.put_at(
            SHARED_CACHE_KEY,
            one_riddle(),
            Utc::now() - TimeDelta::minutes(16),
        );

        let (tx, rx) = watch::channel(false);
        let handle = CacheSweeper::new(Arc::clone(&cache)).spawn(rx);

        tokio::time::sleep(Duration::from_secs(4 * 60)).await;
        assert!(cache.get(SHARED_CACHE_KEY).is_some());

        tokio::time::sleep(Duration::from_secs(2 * 60)).await;
        assert!(cache.get(SHARED_CACHE_KEY).is_none());

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_sender_dropped() {
        let cache = Arc::new(RiddleCache::new());
        let (tx, rx) = watch::channel(false);
        let handle = CacheSweeper::new(cache).spawn(rx);

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .unwrap();
    }
}
