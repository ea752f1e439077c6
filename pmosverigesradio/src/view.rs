//! Plain-text rendering of channels and schedules

use crate::models::{Channel, ScheduleEntry};
use std::fmt::Write;

/// Message shown when a schedule has no entries
pub const NO_PROGRAMS: &str = "No programs found for the selected date and channel.";

/// Placeholder shown for channels without a live stream
pub const NO_LIVE_STREAM: &str = "(no live stream)";

/// Separator printed after each schedule entry
pub const ENTRY_SEPARATOR: &str = "----";

/// One line per channel: name, id and stream URL
pub fn render_channel_list(channels: &[Channel]) -> String {
    let width = channels.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();

    for channel in channels {
        let url = if channel.has_live_audio() {
            channel.audio_url.as_str()
        } else {
            NO_LIVE_STREAM
        };
        let _ = writeln!(out, "{:<width$}  {:>6}  {}", channel.name, channel.id, url);
    }

    out
}

/// Render one schedule entry: title, start time, description, separator
pub fn render_entry(entry: &ScheduleEntry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", entry.title);
    if let Some(subtitle) = entry.subtitle.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "  {}", subtitle);
    }
    let _ = writeln!(out, "Start time: {}", entry.start_time_display());
    let _ = writeln!(out, "Description: {}", entry.description_or_default());
    let _ = writeln!(out, "{}", ENTRY_SEPARATOR);

    out
}

/// Render a whole schedule, or [`NO_PROGRAMS`] when it is empty
pub fn render_schedule(entries: &[ScheduleEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", NO_PROGRAMS);
    }

    entries.iter().map(render_entry).collect()
}
