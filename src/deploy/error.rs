// ABOUTME: Error types for deploy operations.
// ABOUTME: Covers tag resolution, inconsistent daemon state, and start/stop failures.

use crate::daemon::DaemonError;
use crate::state::StateError;
use crate::types::{ContainerId, ImageId, Repository, Tag};
use std::fmt;

/// Which side of a deploy a tag was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    From,
    To,
}

impl fmt::Display for TagRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRole::From => write!(f, "from_tag"),
            TagRole::To => write!(f, "to_tag"),
        }
    }
}

/// Errors that can end a deploy.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A requested tag has no image in the repository.
    #[error("image {repository}:{tag} not found (looking for {role})")]
    TagNotFound {
        repository: Repository,
        tag: Tag,
        role: TagRole,
    },

    /// A running container references a tag the image listing does not know.
    #[error("found tag {tag} with no corresponding image entry")]
    StateInconsistency { tag: String },

    /// Starting a replacement failed. Old containers were left running.
    #[error("failed to start container from image {image}: {source}")]
    StartFailed {
        image: ImageId,
        /// Replacements that did start before the failure.
        started: Vec<ContainerId>,
        source: DaemonError,
    },

    /// Replacements are running but the old containers could not be stopped.
    #[error("failed to stop {} old container(s): {source}", .containers.len())]
    StopFailed {
        containers: Vec<ContainerId>,
        source: DaemonError,
    },

    #[error(transparent)]
    Daemon(#[from] DaemonError),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    TagNotFound,
    StateInconsistency,
    StartFailed,
    StopFailed,
    Daemon,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::TagNotFound { .. } => DeployErrorKind::TagNotFound,
            DeployError::StateInconsistency { .. } => DeployErrorKind::StateInconsistency,
            DeployError::StartFailed { .. } => DeployErrorKind::StartFailed,
            DeployError::StopFailed { .. } => DeployErrorKind::StopFailed,
            DeployError::Daemon(_) => DeployErrorKind::Daemon,
        }
    }

    /// The missing tag's role, for `TagNotFound`.
    pub fn tag_role(&self) -> Option<TagRole> {
        match self {
            DeployError::TagNotFound { role, .. } => Some(*role),
            _ => None,
        }
    }
}

impl From<StateError> for DeployError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Inconsistent { tag } => DeployError::StateInconsistency { tag },
            StateError::Daemon(e) => DeployError::Daemon(e),
        }
    }
}
