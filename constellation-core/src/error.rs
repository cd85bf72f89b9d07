//! Error types for constellation-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::host::HostError;

/// All errors that can arise from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced constellation is not in the registry.
    #[error("constellation '{name}' not found")]
    NotFound { name: String },

    /// The project path is not part of the constellation.
    #[error("project '{}' is not part of constellation '{name}'", project.display())]
    ProjectNotFound { name: String, project: PathBuf },

    /// A constellation with this name already exists and the policy rejects overwrites.
    #[error("constellation '{name}' already exists")]
    AlreadyExists { name: String },

    /// The name cannot be stored: it is empty or spans more than one line.
    #[error("invalid constellation name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// `close` was called for a constellation that is not open.
    #[error("constellation '{name}' is not open")]
    NotOpen { name: String },

    /// Underlying I/O failure, with the offending path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document exists but is not valid JSON of the expected shape.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error (save path).
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The editor failed to open or close a project.
    #[error("editor failed on {}: {source}", path.display())]
    Host {
        path: PathBuf,
        #[source]
        source: HostError,
    },

    /// `dirs::home_dir()` returned `None`, so we cannot locate `~/.constellation/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn not_found(name: &str) -> StoreError {
    StoreError::NotFound {
        name: name.to_owned(),
    }
}

pub(crate) fn host_err(path: impl Into<PathBuf>, source: HostError) -> StoreError {
    StoreError::Host {
        path: path.into(),
        source,
    }
}
