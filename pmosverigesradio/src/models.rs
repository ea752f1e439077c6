//! Data models for Sveriges Radio API responses
//!
//! The wire structures mirror the JSON returned by `api.sr.se` and are
//! lenient: every field the API may omit or send as `null` is defaulted, so a
//! partial record never fails the whole response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fallback text shown when a schedule entry has no description
pub const NO_DESCRIPTION: &str = "No description available";

/// Read an explicit JSON `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Channel Models
// ============================================================================

/// A live broadcast channel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    /// Display name (e.g., "P1")
    pub name: String,
    /// Numeric Sveriges Radio identifier (e.g., 132 for P1)
    pub id: u32,
    /// Live audio stream URL, empty when the channel has no live stream
    pub audio_url: String,
    /// Channel category as reported by the API (e.g., "Rikskanal")
    pub channel_type: Option<String>,
    /// Short tagline
    pub tagline: Option<String>,
}

impl Channel {
    /// Create a channel with only the mandatory fields
    pub fn new(name: impl Into<String>, id: u32, audio_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            audio_url: audio_url.into(),
            channel_type: None,
            tagline: None,
        }
    }

    /// Check whether the channel exposes a live stream
    pub fn has_live_audio(&self) -> bool {
        !self.audio_url.is_empty()
    }
}

/// Response from `/api/v2/channels`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChannelsResponse {
    /// Channel records; absent or null when the API answers with another shape
    #[serde(default)]
    pub channels: Option<Vec<ChannelRecord>>,
}

impl ChannelsResponse {
    /// Convert the raw records, in upstream order
    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
            .unwrap_or_default()
            .into_iter()
            .map(Channel::from)
            .collect()
    }
}

/// Raw channel record as sent by the API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u32,
    pub liveaudio: Option<LiveAudio>,
    pub channeltype: Option<String>,
    pub tagline: Option<String>,
}

/// Nested `liveaudio` object
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LiveAudio {
    pub id: Option<u32>,
    pub url: Option<String>,
}

impl From<ChannelRecord> for Channel {
    fn from(record: ChannelRecord) -> Self {
        Self {
            name: record.name,
            id: record.id,
            audio_url: record.liveaudio.and_then(|l| l.url).unwrap_or_default(),
            channel_type: record.channeltype,
            tagline: record.tagline,
        }
    }
}

// ============================================================================
// Schedule Models
// ============================================================================

/// One scheduled program
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScheduleEntry {
    /// Program title
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Subtitle (episode title), if any
    pub subtitle: Option<String>,
    /// Start time in the `/Date(<millis>)/` wire encoding
    #[serde(deserialize_with = "null_as_default")]
    pub starttimeutc: String,
    /// End time in the `/Date(<millis>)/` wire encoding
    pub endtimeutc: Option<String>,
    /// Free text description
    pub description: Option<String>,
    /// Program the episode belongs to
    pub program: Option<ProgramRef>,
}

impl ScheduleEntry {
    /// Get the description or the fixed fallback text
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// Start time rendered as local `YYYY-MM-DD HH:MM:SS`
    pub fn start_time_display(&self) -> String {
        crate::time::normalize_start_time(&self.starttimeutc)
    }
}

/// Reference to the parent program of a schedule entry
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProgramRef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// One page of `/api/v2/scheduledepisodes`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleResponse {
    pub schedule: Option<Vec<ScheduleEntry>>,
    pub pagination: Option<Pagination>,
}

impl ScheduleResponse {
    /// Whether the server announced another page after this one
    pub fn has_next_page(&self) -> bool {
        self.pagination
            .as_ref()
            .is_some_and(Pagination::has_next_page)
    }
}

/// Pagination block of a paged response
///
/// `nextpage` is untyped upstream (URL string in practice, but booleans and
/// null have been seen), so it is kept as raw JSON and tested for truthiness.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Pagination {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub totalhits: Option<u32>,
    pub totalpages: Option<u32>,
    pub nextpage: Option<Value>,
}

impl Pagination {
    pub fn has_next_page(&self) -> bool {
        self.nextpage.as_ref().is_some_and(is_truthy)
    }
}

/// JSON truthiness: null, false, 0, "", [] and {} are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
