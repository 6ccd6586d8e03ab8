// ABOUTME: State transition methods for rollout orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::daemon::DaemonOps;
use crate::state::{Snapshot, fetch_state};
use crate::types::{ContainerId, ImageId, Tag};
use tracing::{debug, info};

use super::error::{DeployError, TagRole};
use super::rollout::{DeployReport, DeployRequest, Rollout};
use super::state::{Completed, Fetched, Resolved, Started};

// =============================================================================
// -> Fetched
// =============================================================================

impl Rollout<Fetched> {
    /// Take a fresh snapshot of the request's repository.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::StateInconsistency` if a container references an
    /// unknown tag, or `DeployError::Daemon` if the daemon cannot be queried.
    pub async fn fetch<D: DaemonOps + ?Sized>(
        daemon: &D,
        request: DeployRequest,
    ) -> Result<Self, DeployError> {
        let snapshot = fetch_state(daemon, &request.repository).await?;
        Ok(Rollout {
            request,
            state: Fetched { snapshot },
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state.snapshot
    }

    /// Resolve both tags and collect the containers running the old image.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::TagNotFound` naming the first missing tag,
    /// checking `from_tag` before `to_tag`.
    #[must_use = "rollout state must be used"]
    pub fn resolve(self) -> Result<Rollout<Resolved>, DeployError> {
        let snapshot = &self.state.snapshot;
        let from_image = self.lookup(&self.request.from_tag, TagRole::From)?;
        let to_image = self.lookup(&self.request.to_tag, TagRole::To)?;

        let superseded: Vec<ContainerId> = snapshot
            .containers_of(&from_image)
            .map(|c| c.id.clone())
            .collect();

        debug!(
            from = %from_image.short(),
            to = %to_image.short(),
            running = superseded.len(),
            "resolved tags"
        );

        Ok(Rollout {
            request: self.request,
            state: Resolved {
                from_image,
                to_image,
                superseded,
            },
        })
    }

    fn lookup(&self, tag: &Tag, role: TagRole) -> Result<ImageId, DeployError> {
        self.state
            .snapshot
            .resolve(tag.as_str())
            .cloned()
            .ok_or_else(|| DeployError::TagNotFound {
                repository: self.request.repository.clone(),
                tag: tag.clone(),
                role,
            })
    }
}

// =============================================================================
// Resolved -> Started
// =============================================================================

impl Rollout<Resolved> {
    /// Number of replacements to start: one per old container, at least one.
    pub fn replicas(&self) -> usize {
        self.state.superseded.len().max(1)
    }

    pub fn superseded(&self) -> &[ContainerId] {
        &self.state.superseded
    }

    /// Start the replacements one after another.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::StartFailed` on the first failed start. Nothing
    /// is stopped and nothing already started is removed.
    #[must_use = "rollout state must be used"]
    pub async fn start_replacements<D: DaemonOps + ?Sized>(
        self,
        daemon: &D,
    ) -> Result<Rollout<Started>, DeployError> {
        let count = self.replicas();
        let Resolved {
            from_image,
            to_image,
            superseded,
        } = self.state;

        info!(
            "Starting {} containers with {}:{}",
            count, self.request.repository, self.request.to_tag
        );

        let mut started = Vec::with_capacity(count);
        for _ in 0..count {
            match daemon.start_container(&to_image).await {
                Ok(id) => started.push(id),
                Err(source) => {
                    return Err(DeployError::StartFailed {
                        image: to_image,
                        started,
                        source,
                    });
                }
            }
        }

        info!("Started {} containers", started.len());

        Ok(Rollout {
            request: self.request,
            state: Started {
                from_image,
                to_image,
                superseded,
                started,
            },
        })
    }
}

// =============================================================================
// Started -> Completed
// =============================================================================

impl Rollout<Started> {
    pub fn started(&self) -> &[ContainerId] {
        &self.state.started
    }

    /// Stop every old container in a single batch.
    ///
    /// With no old containers there is nothing to stop and the daemon is not
    /// called.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::StopFailed` if the daemon rejects the stop.
    #[must_use = "rollout state must be used"]
    pub async fn stop_superseded<D: DaemonOps + ?Sized>(
        self,
        daemon: &D,
    ) -> Result<Rollout<Completed>, DeployError> {
        let Started {
            from_image,
            to_image,
            superseded,
            started,
        } = self.state;

        info!(
            "Shutting down {} old containers with {}:{}",
            superseded.len(),
            self.request.repository,
            self.request.from_tag
        );

        if superseded.is_empty() {
            debug!("no old containers running, skipping stop");
        } else if let Err(source) = daemon.stop_containers(&superseded).await {
            return Err(DeployError::StopFailed {
                containers: superseded,
                source,
            });
        }

        info!("Shut down {} old containers", superseded.len());

        Ok(Rollout {
            request: self.request,
            state: Completed {
                from_image,
                to_image,
                started,
                stopped: superseded,
            },
        })
    }
}

// =============================================================================
// Completed
// =============================================================================

impl Rollout<Completed> {
    /// Finish the rollout and return what happened.
    pub fn finish(self) -> DeployReport {
        let DeployRequest {
            repository,
            from_tag,
            to_tag,
        } = self.request;
        let Completed {
            from_image,
            to_image,
            started,
            stopped,
        } = self.state;

        DeployReport {
            repository,
            from_tag,
            to_tag,
            from_image,
            to_image,
            started,
            stopped,
        }
    }
}
