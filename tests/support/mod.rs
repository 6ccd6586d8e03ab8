// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory daemon that records every call it receives.

use async_trait::async_trait;
use gantry::daemon::{ContainerEntry, DaemonError, DaemonOps, ImageEntry};
use gantry::types::{ContainerId, ImageId, Repository, Tag};
use parking_lot::Mutex;
use std::sync::Once;

pub const LATEST_IMAGE: &str = "51f59b5c1b8354c2cc430cc3641fc87a0ad8443465f7b97d9f79ad6263f45548";
pub const OLD_IMAGE: &str = "e79a8874751c79664fdaf56e4af392d3c528fad1830b2588bf05eca876122e3f";
pub const UNTAGGED_IMAGE: &str = "3d0b615220644b2152cfd146f096d4b813ec87aa981bc43921efd071f7343916";
pub const OTHER_REPO_IMAGE: &str =
    "9c2a7e4d13f1b08e55a3c6d29f0e4b71a8c5d6e3f2b1a0987654321fedcba098";

pub const BY_TAG_1: &str = "1da4dfe2db6dbf45755f8419e9de4e78f340b4f300783a57e42ead853b46158a";
pub const BY_TAG_2: &str = "5e68d8d416da617eeed45f7613f820731fe1d642ff343a43a4a49b55cbb2116e";
pub const BY_SHORT_ID: &str = "60008cffafabaca08174af02d95de22bda6aad09a31a86aeb6b47a6c77f3bec3";
pub const BY_TOO_SHORT_ID: &str =
    "240eeaa7cb8b52d14328d3e4b6b2e4a5432fc52e12da7b0b1db2b6498d03a196";
pub const OTHER_REPO_CONTAINER: &str =
    "fd677144ec1eeab4c396fa80be8bffb7a55bafb89a99c2ec9bab7c8ad902c8c2";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("gantry=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub fn repo(name: &str) -> Repository {
    Repository::new(name).unwrap()
}

#[allow(dead_code)]
pub fn tag(name: &str) -> Tag {
    Tag::new(name).unwrap()
}

/// One call received by [`FakeDaemon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListImages(String),
    ListContainers,
    Stop(Vec<ContainerId>),
    Start(ImageId),
}

/// In-memory daemon holding a fixed image and container listing.
pub struct FakeDaemon {
    images: Vec<ImageEntry>,
    containers: Vec<ContainerEntry>,
    fail_start_after: Option<usize>,
    fail_stop: bool,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl FakeDaemon {
    pub fn new(images: Vec<ImageEntry>, containers: Vec<ContainerEntry>) -> Self {
        Self {
            images,
            containers,
            fail_start_after: None,
            fail_stop: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Repository `foo` with tags `latest` and `124` on one image, `123` on
    /// another, plus an untagged image. Three running containers are on
    /// `123`, named three different ways. Two more must be ignored: one
    /// names an ID too short to match, the other belongs to `bar`.
    pub fn fixture() -> Self {
        let foo = repo("foo");
        let images = vec![
            ImageEntry::tagged(ImageId::new(LATEST_IMAGE), foo.clone(), tag("latest")),
            ImageEntry::tagged(ImageId::new(LATEST_IMAGE), foo.clone(), tag("124")),
            ImageEntry::tagged(ImageId::new(OLD_IMAGE), foo.clone(), tag("123")),
            ImageEntry::untagged(ImageId::new(UNTAGGED_IMAGE), foo),
            ImageEntry::tagged(ImageId::new(OTHER_REPO_IMAGE), repo("bar"), tag("abc")),
        ];
        let containers = vec![
            container(BY_TAG_1, "foo:123", Some("49153->80, 49154->8080")),
            container(BY_TAG_2, "foo:123", Some("49155->80")),
            container(BY_SHORT_ID, "e79a8874751c", None),
            container(BY_TOO_SHORT_ID, "e79", Some("49160->80")),
            container(OTHER_REPO_CONTAINER, "bar:abc", Some("49170->80")),
        ];
        Self::new(images, containers)
    }

    /// Let `n` starts succeed, then fail every later one.
    pub fn failing_start_after(mut self, n: usize) -> Self {
        self.fail_start_after = Some(n);
        self
    }

    pub fn failing_stop(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn starts(&self) -> Vec<ImageId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Start(image) => Some(image),
                _ => None,
            })
            .collect()
    }

    pub fn stops(&self) -> Vec<Vec<ContainerId>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Stop(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }
}

#[allow(dead_code)]
pub fn container(id: &str, image: &str, ports: Option<&str>) -> ContainerEntry {
    ContainerEntry {
        id: ContainerId::new(id),
        image: image.to_string(),
        ports: ports.map(str::to_string),
    }
}

#[async_trait]
impl DaemonOps for FakeDaemon {
    async fn list_images(&self, repository: &Repository) -> Result<Vec<ImageEntry>, DaemonError> {
        self.calls
            .lock()
            .push(Call::ListImages(repository.to_string()));
        Ok(self
            .images
            .iter()
            .filter(|e| &e.repository == repository)
            .cloned()
            .collect())
    }

    async fn list_containers(&self) -> Result<Vec<ContainerEntry>, DaemonError> {
        self.calls.lock().push(Call::ListContainers);
        Ok(self.containers.clone())
    }

    async fn stop_containers(&self, ids: &[ContainerId]) -> Result<(), DaemonError> {
        self.calls.lock().push(Call::Stop(ids.to_vec()));
        if self.fail_stop {
            return Err(DaemonError::request("stop_container", "daemon refused"));
        }
        Ok(())
    }

    async fn start_container(&self, image: &ImageId) -> Result<ContainerId, DaemonError> {
        let mut calls = self.calls.lock();
        let started = calls.iter().filter(|c| matches!(c, Call::Start(_))).count();
        calls.push(Call::Start(image.clone()));

        if self.fail_start_after.is_some_and(|n| started >= n) {
            return Err(DaemonError::request("start_container", "no command specified"));
        }
        Ok(ContainerId::new(format!("started-{started}")))
    }
}
