//! External audio player launcher

use anyhow::{Context, Result, anyhow, bail};
use tokio::process::Command;
use tracing::info;

/// Split a player command line into program and leading arguments
pub fn parse_player_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Run the player with the stream URL as last argument and wait for it
pub async fn play(command: &str, url: &str) -> Result<()> {
    let (program, args) =
        parse_player_command(command).ok_or_else(|| anyhow!("Empty player command"))?;

    info!(player = %program, url = %url, "Launching player");

    let status = Command::new(&program)
        .args(&args)
        .arg(url)
        .status()
        .await
        .with_context(|| format!("Failed to launch player '{}'", program))?;

    if !status.success() {
        bail!("Player '{}' exited with {}", program, status);
    }
    Ok(())
}
