use tokio::{
    task::JoinHandle,
    time::{interval, Duration, MissedTickBehavior},
};

use crate::cache::ProjectCache;

/// Periodically drops expired cache entries that nobody read again.
pub fn start_cache_sweep_task(cache: ProjectCache, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;

            let removed = cache.purge_expired();
            let stats = cache.stats();
            tracing::debug!(
                removed,
                entries = stats.entries,
                hits = stats.hits,
                misses = stats.misses,
                "Cache sweep finished"
            );
        }
    })
}
