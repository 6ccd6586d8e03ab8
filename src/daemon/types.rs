// ABOUTME: Record shapes returned by daemon adapters.
// ABOUTME: Validated at the adapter boundary so downstream code never sees loose fields.

use crate::types::{ContainerId, ImageId, Repository, Tag};

/// One image listing entry. An image with several tags appears once per tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub id: ImageId,
    pub repository: Repository,
    pub tag: Option<Tag>,
}

impl ImageEntry {
    pub fn tagged(id: ImageId, repository: Repository, tag: Tag) -> Self {
        Self {
            id,
            repository,
            tag: Some(tag),
        }
    }

    pub fn untagged(id: ImageId, repository: Repository) -> Self {
        Self {
            id,
            repository,
            tag: None,
        }
    }
}

/// One running container as the daemon reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    pub id: ContainerId,
    /// Image the container was created from, verbatim: `repo:tag`, a full
    /// image ID, or an abbreviated one.
    pub image: String,
    /// Published ports as `"host->guest"` pairs joined by `", "`.
    pub ports: Option<String>,
}
