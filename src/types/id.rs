// ABOUTME: Phantom-typed identifiers for compile-time type safety.
// ABOUTME: Keeps container and image IDs from being swapped, and matches short image IDs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
/// Using empty enums prevents instantiation and requires no trait bounds.
pub enum ContainerMarker {}
pub enum ImageMarker {}

/// Length of the abbreviated image IDs daemons print in place of full IDs.
pub const SHORT_ID_LEN: usize = 12;

/// Algorithm prefix daemons put in front of content-derived image IDs.
const DIGEST_PREFIX: &str = "sha256:";

/// A type-safe identifier that prevents accidental mixing of different ID types.
///
/// A `ContainerId` can never be handed to an operation expecting an `ImageId`,
/// so "stop this image" or "start this container" fail at compile time.
#[must_use = "IDs reference resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl Id<ImageMarker> {
    /// Hex part of the ID, without any `sha256:` prefix.
    pub fn hex(&self) -> &str {
        self.value
            .strip_prefix(DIGEST_PREFIX)
            .unwrap_or(&self.value)
    }

    /// Abbreviated form, as printed by `docker ps`.
    pub fn short(&self) -> &str {
        let hex = self.hex();
        hex.get(..SHORT_ID_LEN).unwrap_or(hex)
    }

    /// Whether `candidate` is an abbreviated form of this ID.
    ///
    /// Only prefixes of exactly [`SHORT_ID_LEN`] characters count. Shorter
    /// prefixes are too likely to be ambiguous and never match.
    pub fn matches_short(&self, candidate: &str) -> bool {
        candidate.len() == SHORT_ID_LEN
            && (self.value.starts_with(candidate) || self.hex().starts_with(candidate))
    }
}

// Manual trait implementations that don't require T to implement the trait.
// This is necessary because T is only used as a phantom type marker.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Id").field("value", &self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

// Eq, Ord and Hash all delegate to the string, so lookups by &str agree with them.
impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

pub type ContainerId = Id<ContainerMarker>;
pub type ImageId = Id<ImageMarker>;
