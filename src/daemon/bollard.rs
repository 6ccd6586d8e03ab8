// ABOUTME: Bollard-based daemon adapter.
// ABOUTME: Talks to the Docker Engine API over HTTP/TCP or a unix socket.

use super::error::DaemonError;
use super::types::{ContainerEntry, ImageEntry};
use super::DaemonOps;
use crate::config::Config;
use crate::types::{ContainerId, ImageId, ImageRef, PortMapping, Repository, Tag, render_ports};
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::ContainerCreateBody;
use bollard::query_parameters::{
    CreateContainerOptions, ListContainersOptions, ListImagesOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Placeholder the daemon lists for dangling images.
const UNTAGGED: &str = "<none>:<none>";

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_request_error(operation: &'static str, e: bollard::errors::Error) -> DaemonError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => DaemonError::NotFound {
            resource: message.clone(),
        },
        _ => DaemonError::request(operation, e),
    }
}

fn map_stop_error(e: bollard::errors::Error) -> Option<DaemonError> {
    match &e {
        // 304: already stopped, which is the state we want.
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 304 =>
        {
            None
        }
        _ => Some(map_request_error("stop container", e)),
    }
}

// =============================================================================
// Connection
// =============================================================================

/// Open a client for `url`.
///
/// `unix://` URLs and absolute paths use the socket; anything else
/// (`http://`, `tcp://`) goes over HTTP.
fn connect_client(url: &str, timeout: Duration) -> Result<Docker, DaemonError> {
    let secs = timeout.as_secs().max(1);
    let socket = url.strip_prefix("unix://").or_else(|| url.starts_with('/').then_some(url));

    let client = match socket {
        Some(path) => Docker::connect_with_unix(path, secs, bollard::API_DEFAULT_VERSION),
        None => Docker::connect_with_http(url, secs, bollard::API_DEFAULT_VERSION),
    };

    client.map_err(|e| DaemonError::Connect {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Turn one image summary into listing entries for `repository`.
///
/// The daemon returns one summary per image with every `repo:tag` it carries.
/// Each tag in `repository` becomes its own entry; an image with none of
/// them becomes a single untagged entry.
fn expand_image(id: &str, repo_tags: &[String], repository: &Repository) -> Vec<ImageEntry> {
    let image_id = ImageId::new(id);

    let entries: Vec<ImageEntry> = repo_tags
        .iter()
        .filter(|t| t.as_str() != UNTAGGED)
        .filter_map(|t| match ImageRef::classify(t) {
            ImageRef::Tagged {
                repository: repo,
                tag,
            } if repo == repository.as_str() => Tag::new(tag).ok(),
            _ => None,
        })
        .map(|tag| ImageEntry::tagged(image_id.clone(), repository.clone(), tag))
        .collect();

    if entries.is_empty() {
        vec![ImageEntry::untagged(image_id, repository.clone())]
    } else {
        entries
    }
}

/// Collect published ports, skipping exposed-only ones and the duplicate
/// IPv4/IPv6 bindings daemons report for the same pair.
fn published_ports(pairs: impl IntoIterator<Item = (Option<u16>, u16)>) -> Option<String> {
    let mut ports: Vec<PortMapping> = Vec::new();
    for (public, private) in pairs {
        if let Some(public) = public {
            let mapping = PortMapping::new(public, private);
            if !ports.contains(&mapping) {
                ports.push(mapping);
            }
        }
    }

    (!ports.is_empty()).then(|| render_ports(&ports))
}

// =============================================================================
// BollardDaemon
// =============================================================================

/// Daemon adapter using bollard.
pub struct BollardDaemon {
    client: Docker,
    stop_timeout: Duration,
}

impl BollardDaemon {
    /// Wrap an existing client.
    pub fn new(client: Docker, stop_timeout: Duration) -> Self {
        Self {
            client,
            stop_timeout,
        }
    }

    /// Connect using the daemon address and timeouts from `config`.
    ///
    /// No request is made here; an unreachable daemon surfaces on first use.
    pub fn connect(config: &Config) -> Result<Self, DaemonError> {
        let client = connect_client(&config.base_url, config.timeout)?;
        Ok(Self::new(client, config.stop_timeout))
    }
}

#[async_trait]
impl DaemonOps for BollardDaemon {
    async fn list_images(&self, repository: &Repository) -> Result<Vec<ImageEntry>, DaemonError> {
        let mut filters: HashMap<String, Vec<String>> = HashMap::new();
        filters.insert("reference".to_string(), vec![repository.to_string()]);

        let opts = ListImagesOptions {
            filters: Some(filters),
            ..Default::default()
        };

        let summaries = self
            .client
            .list_images(Some(opts))
            .await
            .map_err(|e| map_request_error("list images", e))?;

        debug!(%repository, count = summaries.len(), "listed images");

        Ok(summaries
            .iter()
            .flat_map(|s| expand_image(&s.id, &s.repo_tags, repository))
            .collect())
    }

    async fn list_containers(&self) -> Result<Vec<ContainerEntry>, DaemonError> {
        let opts = ListContainersOptions {
            all: false,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| map_request_error("list containers", e))?;

        debug!(count = containers.len(), "listed running containers");

        Ok(containers
            .into_iter()
            .filter_map(|c| {
                let id = c.id?;
                let ports = published_ports(c.ports.unwrap_or_default().into_iter().map(|p| {
                    (
                        p.public_port.and_then(|port| u16::try_from(port).ok()),
                        u16::try_from(p.private_port).unwrap_or_default(),
                    )
                }));

                Some(ContainerEntry {
                    id: ContainerId::new(id),
                    image: c.image.unwrap_or_default(),
                    ports,
                })
            })
            .collect())
    }

    async fn stop_containers(&self, ids: &[ContainerId]) -> Result<(), DaemonError> {
        let grace = i32::try_from(self.stop_timeout.as_secs()).unwrap_or(i32::MAX);

        for id in ids {
            let opts = StopContainerOptions {
                t: Some(grace),
                signal: None,
            };

            match self.client.stop_container(id.as_str(), Some(opts)).await {
                Ok(()) => debug!(container = %id, "stopped container"),
                Err(e) => {
                    if let Some(err) = map_stop_error(e) {
                        return Err(err);
                    }
                    debug!(container = %id, "container was already stopped");
                }
            }
        }

        Ok(())
    }

    async fn start_container(&self, image: &ImageId) -> Result<ContainerId, DaemonError> {
        let body = ContainerCreateBody {
            image: Some(image.to_string()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(None::<CreateContainerOptions>, body)
            .await
            .map_err(|e| map_request_error("create container", e))?;
        let id = ContainerId::new(response.id);

        if let Err(e) = self
            .client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await
        {
            // Clean up the created container on start failure
            let opts = RemoveContainerOptions {
                force: true,
                ..Default::default()
            };
            if let Err(remove_err) = self.client.remove_container(id.as_str(), Some(opts)).await {
                warn!(container = %id, error = %remove_err, "failed to remove unstarted container");
            }
            return Err(map_request_error("start container", e));
        }

        debug!(container = %id, image = %image.short(), "started container");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> Repository {
        Repository::new(name).unwrap()
    }

    #[test]
    fn one_entry_per_repository_tag() {
        let tags = vec!["foo:latest".to_string(), "foo:124".to_string()];
        let entries = expand_image("sha256:51f5", &tags, &repo("foo"));

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.id.as_str() == "sha256:51f5"));
        let names: Vec<_> = entries
            .iter()
            .map(|e| e.tag.as_ref().unwrap().as_str())
            .collect();
        assert_eq!(names, vec!["latest", "124"]);
    }

    #[test]
    fn tags_of_other_repositories_are_dropped() {
        let tags = vec!["foo:1".to_string(), "bar:1".to_string()];
        let entries = expand_image("sha256:aa", &tags, &repo("foo"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tag.as_ref().unwrap().as_str(), "1");
    }

    #[test]
    fn dangling_image_is_untagged() {
        let tags = vec![UNTAGGED.to_string()];
        let entries = expand_image("sha256:bb", &tags, &repo("foo"));
        assert_eq!(entries, vec![ImageEntry::untagged(ImageId::new("sha256:bb"), repo("foo"))]);
    }

    #[test]
    fn no_tags_is_untagged() {
        let entries = expand_image("sha256:cc", &[], &repo("foo"));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].tag.is_none());
    }

    #[test]
    fn published_ports_skip_unbound_and_duplicates() {
        let rendered = published_ports(vec![
            (Some(49153), 80),
            (Some(49153), 80),
            (None, 443),
            (Some(49154), 8080),
        ]);
        assert_eq!(rendered.as_deref(), Some("49153->80, 49154->8080"));
    }

    #[test]
    fn no_published_ports_is_none() {
        assert_eq!(published_ports(vec![(None, 80)]), None);
    }

    #[tokio::test]
    async fn http_url_connects_lazily() {
        let client = connect_client("http://127.0.0.1:4243", Duration::from_secs(5));
        assert!(client.is_ok());
    }
}
