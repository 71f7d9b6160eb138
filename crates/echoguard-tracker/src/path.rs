//! Tracked path keys
//!
//! Provides [`TrackedPath`], the validated key for all per-path tracker
//! state. The tracker treats paths as opaque identifiers: no normalization,
//! no filesystem access. Callers are expected to pass the same absolute path
//! string to every operation for a given file.

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::TrackerError;

/// A non-empty path identifier, cheap to clone
///
/// Backed by `Arc<str>` so that the same key can be held by the pause map,
/// the digest map, and a pending timer callback without copying the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackedPath(Arc<str>);

impl TrackedPath {
    /// Validate and wrap a path string
    ///
    /// # Errors
    /// Returns [`TrackerError::EmptyPath`] for the empty string.
    pub fn new(path: impl AsRef<str>) -> Result<Self, TrackerError> {
        let path = path.as_ref();
        if path.is_empty() {
            return Err(TrackerError::EmptyPath);
        }
        Ok(Self(Arc::from(path)))
    }

    /// The path as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TrackedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the per-path maps be probed with a plain `&str`, so the classify hot
// path allocates nothing.
impl Borrow<str> for TrackedPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for TrackedPath {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn tracked_path_accepts_non_empty() {
        let path = TrackedPath::new("/project/Button.tsx").unwrap();
        assert_eq!(path.as_str(), "/project/Button.tsx");
        assert_eq!(path.to_string(), "/project/Button.tsx");
    }

    #[test]
    fn tracked_path_rejects_empty() {
        assert_eq!(TrackedPath::new("").unwrap_err(), TrackerError::EmptyPath);
    }

    #[test]
    fn tracked_path_is_opaque() {
        // No normalization: distinct spellings are distinct keys.
        let a = TrackedPath::new("/project/./Button.tsx").unwrap();
        let b = TrackedPath::new("/project/Button.tsx").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tracked_path_str_lookup() {
        let mut map = HashMap::new();
        map.insert(TrackedPath::new("/project/App.tsx").unwrap(), 1);
        // Borrow<str> allows lookups without building a key
        assert_eq!(map.get("/project/App.tsx"), Some(&1));
        assert_eq!(map.get("/project/Other.tsx"), None);
    }

    #[test]
    fn tracked_path_parse() {
        let path: TrackedPath = "/project/index.ts".parse().unwrap();
        assert_eq!(path.as_str(), "/project/index.ts");
        assert!("".parse::<TrackedPath>().is_err());
    }
}
