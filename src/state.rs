// ABOUTME: Snapshot of a repository's images, tags and running containers.
// ABOUTME: Normalizes every container's image reference to a full image ID.

use crate::daemon::{ContainerEntry, DaemonError, DaemonOps};
use crate::types::{ContainerId, ImageId, ImageRef, Repository, Tag};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Per-image metadata kept in the image index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub id: ImageId,
    pub repository: Repository,
}

/// Image ID → metadata. Ordered so short-ID matching is deterministic.
pub type ImageIndex = BTreeMap<ImageId, ImageMeta>;

/// Tag → image ID. Several tags may alias one image.
pub type TagIndex = HashMap<Tag, ImageId>;

/// A running container of the fetched repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: ContainerId,
    /// Full ID of the image the container runs, whatever form the daemon used.
    pub image: ImageId,
    /// Published ports as reported by the daemon, unparsed.
    pub ports: Option<String>,
}

/// Everything known about one repository at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub images: ImageIndex,
    pub tags: TagIndex,
    pub containers: Vec<Container>,
}

impl Snapshot {
    /// Image a tag points at, if the tag exists.
    pub fn resolve(&self, tag: &str) -> Option<&ImageId> {
        self.tags.get(tag)
    }

    /// Containers running `image`, in daemon listing order.
    pub fn containers_of<'a>(&'a self, image: &'a ImageId) -> impl Iterator<Item = &'a Container> {
        self.containers.iter().filter(move |c| &c.image == image)
    }
}

/// Errors from building a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A container names a tag the image listing does not know.
    #[error("found tag {tag} with no corresponding image entry")]
    Inconsistent { tag: String },

    #[error(transparent)]
    Daemon(#[from] DaemonError),
}

/// Fetch the image and tag indexes for `repository`.
///
/// The first entry seen for an image ID is kept; later entries for the same
/// ID only add tags.
pub async fn fetch_images<D: DaemonOps + ?Sized>(
    daemon: &D,
    repository: &Repository,
) -> Result<(ImageIndex, TagIndex), DaemonError> {
    let mut images = ImageIndex::new();
    let mut tags = TagIndex::new();

    for entry in daemon.list_images(repository).await? {
        images.entry(entry.id.clone()).or_insert_with(|| ImageMeta {
            id: entry.id.clone(),
            repository: entry.repository,
        });

        if let Some(tag) = entry.tag {
            tags.insert(tag, entry.id);
        }
    }

    Ok((images, tags))
}

/// Fetch a fresh snapshot of `repository`.
///
/// The container listing is global; only containers whose image belongs to
/// `repository` are kept.
pub async fn fetch_state<D: DaemonOps + ?Sized>(
    daemon: &D,
    repository: &Repository,
) -> Result<Snapshot, StateError> {
    let (images, tags) = fetch_images(daemon, repository).await?;

    let mut containers = Vec::new();
    for entry in daemon.list_containers().await? {
        if let Some(container) = normalize(entry, repository, &images, &tags)? {
            containers.push(container);
        }
    }

    debug!(
        %repository,
        images = images.len(),
        tags = tags.len(),
        containers = containers.len(),
        "fetched state"
    );

    Ok(Snapshot {
        images,
        tags,
        containers,
    })
}

/// Resolve a container's image reference against the indexes.
///
/// Returns `None` for containers that belong to another repository or whose
/// reference cannot be matched with confidence.
fn normalize(
    entry: ContainerEntry,
    repository: &Repository,
    images: &ImageIndex,
    tags: &TagIndex,
) -> Result<Option<Container>, StateError> {
    let ContainerEntry { id, image, ports } = entry;

    // Full IDs may carry a `sha256:` prefix, so check them before splitting on ':'.
    let resolved = if let Some((full, _)) = images.get_key_value(image.as_str()) {
        Some(full.clone())
    } else {
        match ImageRef::classify(&image) {
            ImageRef::Tagged {
                repository: repo,
                tag,
            } => {
                if repo != repository.as_str() {
                    return Ok(None);
                }
                let full = tags.get(tag).ok_or_else(|| StateError::Inconsistent {
                    tag: tag.to_string(),
                })?;
                Some(full.clone())
            }
            ImageRef::Bare(short) => images.keys().find(|full| full.matches_short(short)).cloned(),
        }
    };

    match resolved {
        Some(full) => {
            debug!(container = %id, reference = %image, image = %full.short(), "matched container");
            Ok(Some(Container {
                id,
                image: full,
                ports,
            }))
        }
        None => Ok(None),
    }
}
