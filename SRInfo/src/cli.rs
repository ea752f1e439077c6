//! Command line definition

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Sveriges Radio channels, live streams and program schedules
#[derive(Debug, Parser)]
#[command(name = "srinfo", version, about)]
pub struct Cli {
    /// Configuration directory (defaults to $SRINFO_CONFIG, ./.srinfo or ~/.srinfo)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List every channel with its live stream URL
    Channels,

    /// Listen to a channel: print its stream URL or hand it to a player
    Listen {
        /// Channel name, e.g. "P1"
        name: String,

        /// Player command receiving the stream URL as last argument (e.g. "mpv --no-video")
        #[arg(long, value_name = "CMD")]
        player: Option<String>,
    },

    /// Show the program schedule of a channel for a day
    Schedule {
        /// Channel name, e.g. "P1"
        name: String,

        /// Day to show, YYYY-MM-DD (defaults to today)
        #[arg(long, short, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
}
