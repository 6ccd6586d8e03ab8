// ABOUTME: Generic rollout struct parameterized by state marker.
// ABOUTME: Holds the request for the whole deploy and the report it finishes with.

use crate::types::{ContainerId, ImageId, Repository, Tag};
use serde::Serialize;

/// What to deploy: move `repository` from `from_tag` to `to_tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub repository: Repository,
    pub from_tag: Tag,
    pub to_tag: Tag,
}

/// A rollout in progress, parameterized by its current state.
///
/// Transitions consume the rollout and return the next state, so a stop can
/// only be issued on a `Rollout<Started>`, i.e. after every start succeeded.
#[derive(Debug)]
pub struct Rollout<S> {
    pub(crate) request: DeployRequest,
    pub(crate) state: S,
}

impl<S> Rollout<S> {
    pub fn request(&self) -> &DeployRequest {
        &self.request
    }

    pub fn repository(&self) -> &Repository {
        &self.request.repository
    }
}

/// Outcome of a finished deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub repository: Repository,
    pub from_tag: Tag,
    pub to_tag: Tag,
    pub from_image: ImageId,
    pub to_image: ImageId,
    pub started: Vec<ContainerId>,
    pub stopped: Vec<ContainerId>,
}
