// ABOUTME: Rollout state types for the type state pattern.
// ABOUTME: Each state carries exactly the data the next transition needs.

use crate::state::Snapshot;
use crate::types::{ContainerId, ImageId};

/// State fetched: snapshot of the repository taken.
/// Available actions: `resolve()`
#[derive(Debug, Clone)]
pub struct Fetched {
    pub(crate) snapshot: Snapshot,
}

/// Resolved: both tags mapped to images, old containers identified.
/// Available actions: `start_replacements()`
#[derive(Debug, Clone)]
pub struct Resolved {
    pub(crate) from_image: ImageId,
    pub(crate) to_image: ImageId,
    pub(crate) superseded: Vec<ContainerId>,
}

/// Started: every replacement is running, old containers still are too.
/// Available actions: `stop_superseded()`
#[derive(Debug, Clone)]
pub struct Started {
    pub(crate) from_image: ImageId,
    pub(crate) to_image: ImageId,
    pub(crate) superseded: Vec<ContainerId>,
    pub(crate) started: Vec<ContainerId>,
}

/// Completed: old containers stopped.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Completed {
    pub(crate) from_image: ImageId,
    pub(crate) to_image: ImageId,
    pub(crate) started: Vec<ContainerId>,
    pub(crate) stopped: Vec<ContainerId>,
}
