//! Stateful client for Sveriges Radio with memoization
//!
//! This module wraps the stateless [`SverigesRadioClient`] with an
//! [`ApiCache`], so that identical calls within the cache TTL are answered
//! without touching the network.
//!
//! # Example
//!
//! ```no_run
//! use pmoconfig::Config;
//! use pmosverigesradio::SverigesRadioStatefulClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_config("")?;
//!     let client = SverigesRadioStatefulClient::from_config(&config)?;
//!
//!     let p1 = client.find_channel("P1").await?;
//!     let today = chrono::Local::now().date_naive();
//!     let schedule = client.schedule(p1.id, today).await?;
//!     println!("{} programs on {}", schedule.len(), p1.name);
//!     Ok(())
//! }
//! ```

use crate::cache::ApiCache;
use crate::client::SverigesRadioClient;
use crate::error::{Error, Result};
use crate::models::{Channel, ScheduleEntry};
use chrono::NaiveDate;
use std::sync::Arc;

#[cfg(feature = "pmoconfig")]
use crate::config_ext::SverigesRadioConfigExt;
#[cfg(feature = "pmoconfig")]
use pmoconfig::Config;
#[cfg(feature = "pmoconfig")]
use std::time::Duration;

/// Sveriges Radio client with caller-owned memoization
///
/// Cloning is cheap and clones share the same cache.
#[derive(Debug, Clone)]
pub struct SverigesRadioStatefulClient {
    client: SverigesRadioClient,
    cache: ApiCache,
}

impl SverigesRadioStatefulClient {
    /// Combine a client and a cache
    pub fn new(client: SverigesRadioClient, cache: ApiCache) -> Self {
        Self { client, cache }
    }

    /// Build client and cache from configuration
    #[cfg(feature = "pmoconfig")]
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = SverigesRadioClient::from_config(config)?;
        let ttl = Duration::from_secs(config.get_sverigesradio_cache_ttl()?);
        Ok(Self::new(client, ApiCache::new(ttl)))
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &SverigesRadioClient {
        &self.client
    }

    /// Get the cache
    pub fn cache(&self) -> &ApiCache {
        &self.cache
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Channel directory, from cache when fresh
    pub async fn channels(&self) -> Result<Arc<Vec<Channel>>> {
        if let Some(channels) = self.cache.get_channels().await {
            #[cfg(feature = "logging")]
            tracing::debug!("Using {} cached channels", channels.len());
            return Ok(channels);
        }

        let channels = self.client.list_channels().await?;
        Ok(self.cache.put_channels(channels).await)
    }

    /// Select a channel by name
    ///
    /// An exact match wins; otherwise the first case-insensitive match is
    /// returned.
    pub async fn find_channel(&self, name: &str) -> Result<Channel> {
        let channels = self.channels().await?;
        find_channel_by_name(&channels, name)
            .cloned()
            .ok_or_else(|| Error::ChannelNotFound(name.to_string()))
    }

    // ========================================================================
    // Schedules
    // ========================================================================

    /// Schedule of a channel for a day, from cache when fresh
    pub async fn schedule(
        &self,
        channel_id: u32,
        date: NaiveDate,
    ) -> Result<Arc<Vec<ScheduleEntry>>> {
        if let Some(schedule) = self.cache.get_schedule(channel_id, date).await {
            #[cfg(feature = "logging")]
            tracing::debug!(
                "Using cached schedule for channel {} on {} ({} entries)",
                channel_id,
                date,
                schedule.len()
            );
            return Ok(schedule);
        }

        let schedule = self.client.fetch_schedule(channel_id, date).await?;
        Ok(self.cache.put_schedule(channel_id, date, schedule).await)
    }

    /// Drop every memoized response
    pub async fn refresh(&self) {
        #[cfg(feature = "logging")]
        tracing::info!("Clearing Sveriges Radio cache");
        self.cache.invalidate_all().await;
    }
}

/// Look up a channel by name: exact match first, then case-insensitive
pub fn find_channel_by_name<'a>(channels: &'a [Channel], name: &str) -> Option<&'a Channel> {
    let wanted = name.trim();
    channels
        .iter()
        .find(|c| c.name == wanted)
        .or_else(|| {
            let lower = wanted.to_lowercase();
            channels.iter().find(|c| c.name.to_lowercase() == lower)
        })
}
