// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;
mod image_ref;
mod port;
mod repository;

pub use id::{ContainerId, ImageId, SHORT_ID_LEN};
pub use image_ref::ImageRef;
pub use port::{ParsePortError, PortMapping, parse_ports, render_ports};
pub use repository::{Repository, RepositoryError, Tag, TagError};
