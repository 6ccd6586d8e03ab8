// ABOUTME: Daemon error types with SNAFU pattern.
// ABOUTME: Unifies connection and request failures for programmatic handling.

use snafu::Snafu;

/// Failure talking to the container daemon.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DaemonError {
    #[snafu(display("cannot connect to daemon at {url}: {message}"))]
    Connect { url: String, message: String },

    #[snafu(display("daemon request to {operation} failed: {message}"))]
    Request {
        operation: &'static str,
        message: String,
    },

    #[snafu(display("not found: {resource}"))]
    NotFound { resource: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonErrorKind {
    /// The daemon address could not be used.
    Connection,
    /// The daemon rejected or failed a request.
    Request,
    /// The daemon does not know the referenced container or image.
    NotFound,
}

impl DaemonError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DaemonErrorKind {
        match self {
            DaemonError::Connect { .. } => DaemonErrorKind::Connection,
            DaemonError::Request { .. } => DaemonErrorKind::Request,
            DaemonError::NotFound { .. } => DaemonErrorKind::NotFound,
        }
    }

    /// Build a request failure from any displayable cause.
    pub fn request(operation: &'static str, cause: impl std::fmt::Display) -> Self {
        DaemonError::Request {
            operation,
            message: cause.to_string(),
        }
    }
}
