// ABOUTME: Container daemon adapter: the four operations deploys and queries need.
// ABOUTME: BollardDaemon speaks the Docker Engine API; tests substitute in-memory fakes.

mod bollard;
mod error;
mod types;

pub use self::bollard::BollardDaemon;
pub use error::{DaemonError, DaemonErrorKind};
pub use types::{ContainerEntry, ImageEntry};

use crate::types::{ContainerId, ImageId, Repository};
use async_trait::async_trait;

/// Query and control operations against a container daemon.
///
/// Every call is a single request-response; callers await them one at a time.
#[async_trait]
pub trait DaemonOps: Send + Sync {
    /// List images belonging to `repository`, one entry per tag.
    async fn list_images(&self, repository: &Repository) -> Result<Vec<ImageEntry>, DaemonError>;

    /// List every running container, regardless of repository.
    async fn list_containers(&self) -> Result<Vec<ContainerEntry>, DaemonError>;

    /// Stop the given containers.
    async fn stop_containers(&self, ids: &[ContainerId]) -> Result<(), DaemonError>;

    /// Start a container from `image` using the image's default command.
    async fn start_container(&self, image: &ImageId) -> Result<ContainerId, DaemonError>;
}
