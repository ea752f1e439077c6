//! HTTP client for the Sveriges Radio API
//!
//! This module provides a stateless client for the two read-only resources
//! the application needs: the channel directory and the daily schedule of a
//! channel.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use pmosverigesradio::SverigesRadioClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SverigesRadioClient::new()?;
//!
//!     let channels = client.list_channels().await?;
//!     println!("{} channels", channels.len());
//!
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!     let schedule = client.fetch_schedule(132, date).await?;
//!     for entry in &schedule {
//!         println!("{} {}", entry.start_time_display(), entry.title);
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{Channel, ChannelsResponse, ScheduleEntry, ScheduleResponse};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default Sveriges Radio API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.sr.se";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Number of schedule entries requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "SRInfo/0.1.0 (pmosverigesradio)";

/// Sveriges Radio HTTP client
///
/// The client is stateless and does not cache responses internally.
/// Memoization is the caller's business, see [`crate::cache::ApiCache`].
#[derive(Debug, Clone)]
pub struct SverigesRadioClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    page_size: u32,
}

impl SverigesRadioClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the schedule page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Fetch the full channel directory in upstream order
    ///
    /// Issues exactly one GET. A response without a `channels` field yields an
    /// empty vector rather than an error.
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let url = self.channels_url()?;

        #[cfg(feature = "logging")]
        tracing::debug!("Fetching channels: {}", url);

        let response: ChannelsResponse = self.get_json(url).await?;
        let channels = response.into_channels();

        #[cfg(feature = "logging")]
        tracing::debug!("Received {} channels", channels.len());

        Ok(channels)
    }

    // ========================================================================
    // Schedule
    // ========================================================================

    /// Fetch every scheduled episode of a channel for one calendar day
    ///
    /// Pages are requested one after the other, starting at page 1, until a
    /// response has no `pagination` block or its `nextpage` is falsy. There is
    /// no page bound and no retry: the first failing request aborts the fetch.
    pub async fn fetch_schedule(
        &self,
        channel_id: u32,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>> {
        let mut all_schedule = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.schedule_url(channel_id, date, page)?;

            #[cfg(feature = "logging")]
            tracing::debug!("Fetching schedule page {}: {}", page, url);

            let response: ScheduleResponse = self.get_json(url).await?;
            let has_next = response.has_next_page();
            all_schedule.extend(response.schedule.unwrap_or_default());

            if !has_next {
                break;
            }
            page += 1;
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            "Schedule for channel {} on {}: {} entries over {} page(s)",
            channel_id,
            date,
            all_schedule.len(),
            page
        );

        Ok(all_schedule)
    }

    // ========================================================================
    // Request helpers
    // ========================================================================

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path
        ))?)
    }

    /// Build the channel directory URL
    pub fn channels_url(&self) -> Result<Url> {
        let mut url = self.endpoint("api/v2/channels")?;
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("pagination", "false");
        Ok(url)
    }

    /// Build the URL of one schedule page
    pub fn schedule_url(&self, channel_id: u32, date: NaiveDate, page: u32) -> Result<Url> {
        let mut url = self.endpoint("api/v2/scheduledepisodes")?;
        url.query_pairs_mut()
            .append_pair("channelid", &channel_id.to_string())
            .append_pair("date", &date.format("%Y-%m-%d").to_string())
            .append_pair("format", "json")
            .append_pair("size", &self.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).timeout(self.timeout).send().await?;

        if !response.status().is_success() {
            return Err(Error::api_error(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        // Parse from text so that a non-JSON body surfaces as Error::Json
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Builder for configuring a SverigesRadioClient
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    page_size: u32,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the number of entries requested per schedule page
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SverigesRadioClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.timeout)
                .build()?,
        };

        Ok(SverigesRadioClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
            page_size: self.page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::default();
        assert_eq!(builder.base_url, DEFAULT_BASE_URL);
        assert_eq!(builder.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(
            builder.timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_channels_url() {
        let client = SverigesRadioClient::new().unwrap();
        assert_eq!(
            client.channels_url().unwrap().as_str(),
            "https://api.sr.se/api/v2/channels?format=json&pagination=false"
        );
    }

    #[test]
    fn test_schedule_url() {
        let client = SverigesRadioClient::builder()
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            client.schedule_url(132, date, 2).unwrap().as_str(),
            "http://localhost:8080/api/v2/scheduledepisodes?channelid=132&date=2024-01-01&format=json&size=100&page=2"
        );
    }

    #[test]
    fn test_page_size_floor() {
        let client = SverigesRadioClient::builder().page_size(0).build().unwrap();
        assert_eq!(client.page_size(), 1);
    }

    // ========================================================================
    // Integration Tests (real API calls)
    //
    // Run with: cargo test -p pmosverigesradio -- --ignored
    // ========================================================================

    #[tokio::test]
    #[ignore = "Integration test - calls real Sveriges Radio API"]
    async fn test_list_channels_live() {
        let client = SverigesRadioClient::new().expect("Failed to create client");
        let channels = client.list_channels().await.expect("Failed to list channels");

        assert!(!channels.is_empty(), "Expected channels");
        assert!(
            channels.iter().any(|c| c.id == 132),
            "Expected P1 (132) in the channel list"
        );
    }

    #[tokio::test]
    #[ignore = "Integration test - calls real Sveriges Radio API"]
    async fn test_fetch_schedule_live() {
        let client = SverigesRadioClient::new().expect("Failed to create client");
        let today = chrono::Local::now().date_naive();
        let schedule = client
            .fetch_schedule(132, today)
            .await
            .expect("Failed to fetch schedule");

        println!("P1 today: {} entries", schedule.len());
        for entry in schedule.iter().take(5) {
            println!("  {} {}", entry.start_time_display(), entry.title);
        }
    }
}
