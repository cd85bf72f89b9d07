//! The editor capability the command layer drives.
//!
//! The store only tracks which constellations are open; actually opening or
//! closing project windows is up to whatever implements [`ProjectHost`].

use std::path::{Path, PathBuf};

/// Error reported by a host implementation.
pub type HostError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Open, close, and enumerate project windows in the host editor.
pub trait ProjectHost {
    /// Open the project file at `path` in a new window.
    fn open_project(&mut self, path: &Path) -> Result<(), HostError>;

    /// Close the window showing the project file at `path`.
    fn close_project(&mut self, path: &Path) -> Result<(), HostError>;

    /// Project files currently open in the host, deduplicated.
    fn open_projects(&self) -> Vec<PathBuf>;

    /// Whether [`close_project`](Self::close_project) actually closes a window.
    /// Hosts that cannot reach the editor's windows return `false` and leave
    /// closing to the user.
    fn can_close(&self) -> bool {
        true
    }
}
