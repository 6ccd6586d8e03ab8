// ABOUTME: Application-wide error types for gantry.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::daemon::DaemonError;
use crate::deploy::DeployError;
use crate::query::QueryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Daemon(#[from] DaemonError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
