//! Sveriges Radio client library for SRInfo
//!
//! This crate provides a Rust client for the read-only parts of the
//! Sveriges Radio public API (`api.sr.se`) that SRInfo needs.
//!
//! # Features
//!
//! - **Channel Directory**: all channels with their live audio stream URL
//! - **Daily Schedule**: every scheduled episode of a channel for a date,
//!   following the API pagination to the last page
//! - **Wire Timestamps**: `/Date(<ms>)/` literals rendered as local time
//! - **Memoization**: explicit caller-owned cache with a configurable TTL
//! - **Configuration Extension**: API and cache settings stored in pmoconfig
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use pmosverigesradio::{view, SverigesRadioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SverigesRadioClient::new()?;
//!
//!     let channels = client.list_channels().await?;
//!     print!("{}", view::render_channel_list(&channels));
//!
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!     let schedule = client.fetch_schedule(132, date).await?;
//!     print!("{}", view::render_schedule(&schedule));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Soft failures are absorbed where they happen: an unparseable start time
//! becomes [`time::INVALID_START_TIME`], a response without the expected
//! collection becomes an empty vector. Transport errors, non-success HTTP
//! statuses and non-JSON bodies are returned as [`Error`] without retry.

pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod stateful_client;
pub mod time;
pub mod view;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

// Re-exports
pub use cache::ApiCache;
pub use client::{ClientBuilder, SverigesRadioClient};
pub use error::{Error, Result};
pub use models::{Channel, Pagination, ProgramRef, ScheduleEntry};
pub use stateful_client::{find_channel_by_name, SverigesRadioStatefulClient};
pub use time::normalize_start_time;

#[cfg(feature = "pmoconfig")]
pub use config_ext::SverigesRadioConfigExt;
