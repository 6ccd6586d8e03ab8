// ABOUTME: Classification of image references as reported by the daemon.
// ABOUTME: Distinguishes repo:tag references from bare (possibly abbreviated) image IDs.

use std::fmt;

/// An image reference as a daemon reports it for a running container.
///
/// Daemons echo back whatever the container was created from, so the same
/// image can show up as `foo:123`, as a full ID, or as a 12-character
/// abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// `repository:tag`, possibly with a registry host (`host:5000/app:1`).
    Tagged { repository: &'a str, tag: &'a str },
    /// Anything without a tag: a full or abbreviated image ID.
    Bare(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn classify(input: &'a str) -> Self {
        // The tag separator is the last colon, unless what follows it contains
        // a slash, in which case the colon belongs to a registry port.
        match input.rsplit_once(':') {
            Some((repository, tag)) if !tag.contains('/') && !repository.is_empty() => {
                ImageRef::Tagged { repository, tag }
            }
            _ => ImageRef::Bare(input),
        }
    }

    pub fn repository(&self) -> Option<&'a str> {
        match *self {
            ImageRef::Tagged { repository, .. } => Some(repository),
            ImageRef::Bare(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&'a str> {
        match *self {
            ImageRef::Tagged { tag, .. } => Some(tag),
            ImageRef::Bare(_) => None,
        }
    }
}

impl fmt::Display for ImageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Tagged { repository, tag } => write!(f, "{}:{}", repository, tag),
            ImageRef::Bare(id) => write!(f, "{}", id),
        }
    }
}
