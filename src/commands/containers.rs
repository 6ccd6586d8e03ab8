// ABOUTME: Containers command implementation.
// ABOUTME: Prints the IDs of a repository's running containers.

use super::connection::connect_to_daemon;
use gantry::config::Config;
use gantry::error::Result;
use gantry::output::Output;
use gantry::query;
use gantry::types::{Repository, Tag};

pub async fn containers(
    config: &Config,
    repository: &Repository,
    tag: Option<&Tag>,
    output: Output,
) -> Result<()> {
    let daemon = connect_to_daemon(config)?;
    let containers = query::containers(&daemon, repository, tag).await?;
    output.container_ids(&containers);
    Ok(())
}
