//! Hierarchical structure paths.
//!
//! A path is an ancestor-first, slash-delimited sequence of unit identifiers,
//! e.g. `"1/2/3/4"` for institution 1, directorate 2 and two nested units.

use serde::{Deserialize, Serialize};

/// Position of a principal or entity in the organization tree.
///
/// Comparisons are **textual**: [`StructurePath::contains`] is plain substring
/// containment and does not respect segment boundaries, so `"1/2/13"`
/// contains `"1/2/1"`. Callers that scope access with it inherit that
/// behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructurePath(String);

impl StructurePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring containment of `fragment` anywhere in the path.
    pub fn contains(&self, fragment: &str) -> bool {
        self.0.contains(fragment)
    }
}

impl core::fmt::Display for StructurePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StructurePath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StructurePath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
