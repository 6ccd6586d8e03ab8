// ABOUTME: Validated repository and tag names.
// ABOUTME: Rejects values the daemon could never report back, before any request is made.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest tag the Docker daemon accepts.
const MAX_TAG_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository name cannot be empty")]
    Empty,

    #[error("invalid character in repository name: {0:?}")]
    InvalidChar(char),
}

#[derive(Debug, Error)]
pub enum TagError {
    #[error("tag cannot be empty")]
    Empty,

    #[error("tag exceeds maximum length of 128 characters")]
    TooLong,

    #[error("invalid character in tag: {0:?}")]
    InvalidChar(char),
}

/// A named family of images, e.g. `foo` or `registry.example.com:5000/team/foo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Repository(String);

impl Repository {
    pub fn new(value: &str) -> Result<Self, RepositoryError> {
        if value.is_empty() {
            return Err(RepositoryError::Empty);
        }

        if let Some(c) = value.chars().find(|c| c.is_whitespace() || *c == '@') {
            return Err(RepositoryError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Repository {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A human-assigned label within a repository, e.g. `123` or `latest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: &str) -> Result<Self, TagError> {
        if value.is_empty() {
            return Err(TagError::Empty);
        }

        if value.len() > MAX_TAG_LEN {
            return Err(TagError::TooLong);
        }

        if let Some(c) = value
            .chars()
            .find(|c| c.is_whitespace() || *c == ':' || *c == '/' || *c == '@')
        {
            return Err(TagError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets tag indexes be queried with the raw `&str` split out of a daemon reference.
impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
