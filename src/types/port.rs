// ABOUTME: Published port pairs and the daemon's "host->guest" text form.
// ABOUTME: Parsing is strict: one malformed entry fails the whole list.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PAIR_SEPARATOR: &str = "->";
const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed port mapping: {raw:?}")]
pub struct ParsePortError {
    pub raw: String,
}

/// A host port forwarded to a port inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PortMapping {
    pub host_port: u16,
    pub guest_port: u16,
}

impl PortMapping {
    pub fn new(host_port: u16, guest_port: u16) -> Self {
        Self {
            host_port,
            guest_port,
        }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.host_port, PAIR_SEPARATOR, self.guest_port)
    }
}

impl FromStr for PortMapping {
    type Err = ParsePortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePortError { raw: s.to_string() };
        let (host, guest) = s.split_once(PAIR_SEPARATOR).ok_or_else(err)?;
        let host_port = host.trim().parse().map_err(|_| err())?;
        let guest_port = guest.trim().parse().map_err(|_| err())?;
        Ok(Self::new(host_port, guest_port))
    }
}

/// Parse a daemon port list such as `"49153->80, 49154->8080"`.
///
/// A blank string means the container publishes nothing.
pub fn parse_ports(raw: &str) -> Result<Vec<PortMapping>, ParsePortError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(LIST_SEPARATOR).map(str::parse).collect()
}

/// Render mappings in the list form [`parse_ports`] accepts.
pub fn render_ports(ports: &[PortMapping]) -> String {
    ports
        .iter()
        .map(PortMapping::to_string)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
