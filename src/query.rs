// ABOUTME: Read-only views over a repository snapshot.
// ABOUTME: Lists running containers and their published ports, optionally by tag.

use crate::daemon::DaemonOps;
use crate::state::{Container, StateError, fetch_state};
use crate::types::{ParsePortError, PortMapping, Repository, Tag, parse_ports};

/// Errors from query operations.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Ports(#[from] ParsePortError),
}

/// Running containers of `repository`, optionally only those on `tag`.
///
/// A tag that resolves to nothing yields an empty list.
pub async fn containers<D: DaemonOps + ?Sized>(
    daemon: &D,
    repository: &Repository,
    tag: Option<&Tag>,
) -> Result<Vec<Container>, QueryError> {
    let snapshot = fetch_state(daemon, repository).await?;

    let Some(tag) = tag else {
        return Ok(snapshot.containers);
    };

    let Some(image) = snapshot.resolve(tag.as_str()).cloned() else {
        return Ok(Vec::new());
    };

    Ok(snapshot
        .containers
        .into_iter()
        .filter(|c| c.image == image)
        .collect())
}

/// Published ports of the containers [`containers`] returns, flattened in
/// container then port order.
pub async fn ports<D: DaemonOps + ?Sized>(
    daemon: &D,
    repository: &Repository,
    tag: Option<&Tag>,
) -> Result<Vec<PortMapping>, QueryError> {
    let mut ports = Vec::new();
    for container in containers(daemon, repository, tag).await? {
        if let Some(raw) = &container.ports {
            ports.extend(parse_ports(raw)?);
        }
    }
    Ok(ports)
}
