//! Domain types for the constellation registry.
//!
//! All project path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! The settings document is (de)serialized via serde + serde_json.

use std::borrow::Borrow;
use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a constellation. Unique key in the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstellationName(pub String);

impl fmt::Display for ConstellationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ConstellationName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConstellationName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Borrow<str> for ConstellationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What `create` does when the name is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreatePolicy {
    /// Fail with `StoreError::AlreadyExists`.
    #[default]
    Reject,
    /// Replace the existing record with an empty one.
    Overwrite,
}

impl fmt::Display for CreatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatePolicy::Reject => write!(f, "reject"),
            CreatePolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A named collection of project files.
///
/// Whether a constellation is open is not stored here; see the open-set cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constellation {
    #[serde(default)]
    pub archived: bool,
    /// Insertion-ordered, duplicates allowed.
    #[serde(default)]
    pub projects: Vec<PathBuf>,
}

/// Root of the settings document, as written by this version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub constellations: IndexMap<ConstellationName, Constellation>,
    /// Root handed to discovery; not interpreted by the store.
    #[serde(default)]
    pub search_path: String,
    #[serde(default)]
    pub did_migrate_open: bool,
    #[serde(default)]
    pub create_policy: CreatePolicy,
}

// ---------------------------------------------------------------------------
// Read-side compat shapes
// ---------------------------------------------------------------------------

/// A constellation record as it may appear on disk, including the legacy
/// per-record `open` flag. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StoredConstellation {
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub projects: Vec<PathBuf>,
    #[serde(default)]
    pub open: Option<bool>,
}

/// The settings document as it may appear on disk, before migration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StoredSettings {
    #[serde(default)]
    pub constellations: IndexMap<ConstellationName, StoredConstellation>,
    #[serde(default)]
    pub search_path: String,
    #[serde(default)]
    pub did_migrate_open: bool,
    #[serde(default)]
    pub create_policy: CreatePolicy,
}

impl From<StoredConstellation> for Constellation {
    fn from(c: StoredConstellation) -> Self {
        Self {
            archived: c.archived,
            projects: c.projects,
        }
    }
}

impl From<StoredSettings> for Settings {
    fn from(s: StoredSettings) -> Self {
        Self {
            constellations: s
                .constellations
                .into_iter()
                .map(|(name, c)| (name, c.into()))
                .collect(),
            search_path: s.search_path,
            did_migrate_open: s.did_migrate_open,
            create_policy: s.create_policy,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
