// ABOUTME: Rolling deploys using the type state pattern.
// ABOUTME: Starts replacements for every running old container, then stops the old ones.

mod error;
mod rollout;
mod state;
mod transitions;

pub use error::{DeployError, DeployErrorKind, TagRole};
pub use rollout::{DeployReport, DeployRequest, Rollout};
pub use state::{Completed, Fetched, Resolved, Started};

use crate::daemon::DaemonOps;

/// Move `request.repository` from `from_tag` to `to_tag`.
///
/// Runs every transition in order: fetch, resolve, start, stop. Old
/// containers are only stopped once all replacements have started.
pub async fn deploy<D: DaemonOps + ?Sized>(
    daemon: &D,
    request: DeployRequest,
) -> Result<DeployReport, DeployError> {
    let rollout = Rollout::fetch(daemon, request).await?;
    let rollout = rollout.resolve()?;
    let rollout = rollout.start_replacements(daemon).await?;
    let rollout = rollout.stop_superseded(daemon).await?;
    Ok(rollout.finish())
}
