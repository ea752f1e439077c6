mod cli;
mod player;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Command};
use pmoconfig::Config;
use pmosverigesradio::{SverigesRadioConfigExt, SverigesRadioStatefulClient, view};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Filter used until the configuration is loaded
const BOOTSTRAP_LOG_LEVEL: &str = "warn";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_handle = init_logging();
    let config = Config::load_config(cli.config_dir.as_deref().unwrap_or(""))?;
    apply_log_config(&log_handle, &config);

    let client = SverigesRadioStatefulClient::from_config(&config)?;
    info!(base_url = %client.client().base_url(), "📻 SRInfo ready");

    match cli.command {
        Command::Channels => {
            let channels = client.channels().await?;
            if channels.is_empty() {
                println!("No channels available.");
            } else {
                print!("{}", view::render_channel_list(&channels));
            }
        }

        Command::Listen { name, player } => {
            let channel = client.find_channel(&name).await?;
            if !channel.has_live_audio() {
                println!("{} has no live stream.", channel.name);
                return Ok(());
            }

            match player.or(config.get_player_command()?) {
                Some(command) => player::play(&command, &channel.audio_url).await?,
                None => println!("{}", channel.audio_url),
            }
        }

        Command::Schedule { name, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let channel = client.find_channel(&name).await?;

            info!(channel = %channel.name, id = channel.id, %date, "Fetching schedule");
            let schedule = client.schedule(channel.id, date).await?;

            println!("{} ({}) on {}", channel.name, channel.id, date);
            println!();
            print!("{}", view::render_schedule(&schedule));
        }
    }

    Ok(())
}

/// Install the console subscriber before anything else logs
///
/// The filter starts from `RUST_LOG` (or `warn`) and is swapped once the
/// configuration is known. Logs go to stderr so that stdout only carries the
/// rendered output.
fn init_logging() -> LogHandle {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_LOG_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);

    Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    handle
}

/// Filter directive derived from the configuration
///
/// `None` keeps the current filter: `RUST_LOG` wins over
/// `host.logger.min_level`, but a disabled console silences everything.
fn log_directive(config: &Config, rust_log_set: bool) -> Option<String> {
    if !config.get_log_enable_console().unwrap_or(true) {
        return Some("off".to_string());
    }
    if rust_log_set {
        return None;
    }
    Some(
        config
            .get_log_min_level()
            .unwrap_or_else(|_| BOOTSTRAP_LOG_LEVEL.to_string())
            .to_lowercase(),
    )
}

fn apply_log_config(handle: &LogHandle, config: &Config) {
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if let Some(directive) = log_directive(config, rust_log_set) {
        if let Err(e) = handle.reload(EnvFilter::new(directive)) {
            eprintln!("Failed to reload log filter: {}", e);
        }
    }
}
