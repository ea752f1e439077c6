//! Memoization cache for Sveriges Radio API calls
//!
//! The cache is owned by the caller and keyed by endpoint and arguments:
//! one slot for the channel directory, one slot per `(channel, date)` for
//! schedules. Entries expire after the TTL given at construction and can be
//! dropped explicitly at any time.

use crate::models::{Channel, ScheduleEntry};
use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use std::sync::Arc;
use std::time::Duration;

/// Default TTL for cached responses (10 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Default maximum number of cached schedules
pub const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Cache key of a schedule fetch
pub type ScheduleKey = (u32, NaiveDate);

/// In-memory cache for channel and schedule responses
#[derive(Clone)]
pub struct ApiCache {
    /// Channel directory (single entry)
    channels: Arc<MokaCache<(), Arc<Vec<Channel>>>>,
    /// Schedules by (channel id, date)
    schedules: Arc<MokaCache<ScheduleKey, Arc<Vec<ScheduleEntry>>>>,
    ttl: Duration,
}

impl ApiCache {
    /// Create a cache with the given TTL and the default capacity
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CACHE_CAPACITY)
    }

    /// Create a cache with a specific TTL and schedule capacity
    pub fn with_capacity(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            channels: Arc::new(
                MokaCache::builder()
                    .max_capacity(1)
                    .time_to_live(ttl)
                    .build(),
            ),
            schedules: Arc::new(
                MokaCache::builder()
                    .max_capacity(max_capacity)
                    .time_to_live(ttl)
                    .build(),
            ),
            ttl,
        }
    }

    /// TTL applied to every entry
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // ============ Channels ============

    pub async fn get_channels(&self) -> Option<Arc<Vec<Channel>>> {
        self.channels.get(&()).await
    }

    pub async fn put_channels(&self, channels: Vec<Channel>) -> Arc<Vec<Channel>> {
        let channels = Arc::new(channels);
        self.channels.insert((), channels.clone()).await;
        channels
    }

    pub async fn invalidate_channels(&self) {
        self.channels.invalidate(&()).await;
    }

    // ============ Schedules ============

    pub async fn get_schedule(
        &self,
        channel_id: u32,
        date: NaiveDate,
    ) -> Option<Arc<Vec<ScheduleEntry>>> {
        self.schedules.get(&(channel_id, date)).await
    }

    pub async fn put_schedule(
        &self,
        channel_id: u32,
        date: NaiveDate,
        schedule: Vec<ScheduleEntry>,
    ) -> Arc<Vec<ScheduleEntry>> {
        let schedule = Arc::new(schedule);
        self.schedules
            .insert((channel_id, date), schedule.clone())
            .await;
        schedule
    }

    pub async fn invalidate_schedule(&self, channel_id: u32, date: NaiveDate) {
        self.schedules.invalidate(&(channel_id, date)).await;
    }

    // ============ Global ============

    /// Drop every cached entry
    pub async fn invalidate_all(&self) {
        self.channels.invalidate_all();
        self.schedules.invalidate_all();
        self.channels.run_pending_tasks().await;
        self.schedules.run_pending_tasks().await;
    }

    /// Approximate number of cached schedules
    pub fn schedule_count(&self) -> u64 {
        self.schedules.entry_count()
    }
}

impl Default for ApiCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

impl std::fmt::Debug for ApiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCache")
            .field("ttl", &self.ttl)
            .field("schedules", &self.schedules.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn entry(title: &str) -> ScheduleEntry {
        ScheduleEntry {
            title: title.to_string(),
            starttimeutc: "/Date(1704067200000)/".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_channels_roundtrip() {
        let cache = ApiCache::default();
        assert!(cache.get_channels().await.is_none());

        cache
            .put_channels(vec![Channel::new("P1", 132, "https://example/132.mp3")])
            .await;
        let cached = cache.get_channels().await.unwrap();
        assert_eq!(cached[0].id, 132);

        cache.invalidate_channels().await;
        assert!(cache.get_channels().await.is_none());
    }

    #[tokio::test]
    async fn test_schedule_keys_are_distinct() {
        let cache = ApiCache::default();
        cache.put_schedule(132, date(), vec![entry("Ekot")]).await;

        assert!(cache.get_schedule(132, date()).await.is_some());
        assert!(cache.get_schedule(164, date()).await.is_none());
        assert!(cache
            .get_schedule(132, date().succ_opt().unwrap())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = ApiCache::default();
        cache.put_channels(vec![Channel::new("P1", 132, "")]).await;
        cache.put_schedule(132, date(), vec![entry("Ekot")]).await;

        cache.invalidate_all().await;

        assert!(cache.get_channels().await.is_none());
        assert!(cache.get_schedule(132, date()).await.is_none());
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let cache = ApiCache::new(Duration::from_millis(50));
        cache.put_schedule(132, date(), vec![entry("Ekot")]).await;
        assert!(cache.get_schedule(132, date()).await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get_schedule(132, date()).await.is_none());
    }
}
