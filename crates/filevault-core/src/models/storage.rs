//! Storage location model: where a file's blob lives inside the blob store.

use std::fmt;

/// A blob location, stored on the metadata row as `{bucket}/{key}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub bucket: String,
    pub key: String,
}

impl Location {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Split a stored location on its first `/`.
    ///
    /// Returns `None` when there is no separator or either side is empty.
    pub fn parse(url: &str) -> Option<Self> {
        let (bucket, key) = url.split_once('/')?;
        if bucket.is_empty() || key.is_empty() {
            return None;
        }
        Some(Self::new(bucket, key))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
