// ABOUTME: Deploy command implementation.
// ABOUTME: Runs the rollout state machine and reports what was started and stopped.

use super::connection::connect_to_daemon;
use gantry::config::Config;
use gantry::deploy::{DeployRequest, deploy as run_deploy};
use gantry::error::Result;
use gantry::output::Output;

/// Move a repository's running containers from one tag to another.
pub async fn deploy(config: &Config, request: DeployRequest, mut output: Output) -> Result<()> {
    output.start_timer();
    output.progress(&format!(
        "Deploying {} from {} to {}",
        request.repository, request.from_tag, request.to_tag
    ));

    let daemon = connect_to_daemon(config)?;
    let report = run_deploy(&daemon, request).await?;

    output.progress(&format!(
        "  → Started {} container(s) from {}",
        report.started.len(),
        report.to_image.short()
    ));
    output.progress(&format!(
        "  → Stopped {} old container(s)",
        report.stopped.len()
    ));
    output.finished("Deployment complete!", &report);
    Ok(())
}
