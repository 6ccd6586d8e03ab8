// ABOUTME: Shared helper for connecting to the container daemon.
// ABOUTME: Eliminates duplication across deploy, containers, and ports commands.

use gantry::config::Config;
use gantry::daemon::BollardDaemon;
use gantry::error::Result;
use tracing::debug;

pub fn connect_to_daemon(config: &Config) -> Result<BollardDaemon> {
    debug!(base_url = %config.base_url, "connecting to daemon");
    let daemon = BollardDaemon::connect(config)?;
    Ok(daemon)
}
