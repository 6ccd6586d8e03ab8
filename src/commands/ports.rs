// ABOUTME: Ports command implementation.
// ABOUTME: Prints the published host/guest port pairs of running containers.

use super::connection::connect_to_daemon;
use gantry::config::Config;
use gantry::error::Result;
use gantry::output::Output;
use gantry::query;
use gantry::types::{Repository, Tag};

pub async fn ports(
    config: &Config,
    repository: &Repository,
    tag: Option<&Tag>,
    output: Output,
) -> Result<()> {
    let daemon = connect_to_daemon(config)?;
    let ports = query::ports(&daemon, repository, tag).await?;
    output.port_table(&ports);
    Ok(())
}
