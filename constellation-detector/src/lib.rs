//! Project discovery for `constellation-detector`.
//!
//! `find_projects(search_path)` walks the configured search root and returns
//! every `.sublime-project` file within [`MAX_DEPTH`] levels.
//! `find_upgradeable_workspaces` returns the `.sublime-workspace` files that
//! have no project file next to them, and `upgrade_workspace` gives such a
//! workspace a sibling project file so it can be added to a constellation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// How far below the search root discovery looks.
pub const MAX_DEPTH: usize = 5;

pub const PROJECT_EXTENSION: &str = "sublime-project";
pub const WORKSPACE_EXTENSION: &str = "sublime-workspace";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors from discovery and workspace upgrades.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("search path '{path}' does not exist or is not a directory")]
    SearchPathMissing { path: PathBuf },

    #[error("'{path}' is not a .sublime-workspace file")]
    NotAWorkspace { path: PathBuf },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DetectError {
    DetectError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Every project file under `search_path`, sorted.
pub fn find_projects(search_path: &Path) -> Result<Vec<PathBuf>, DetectError> {
    find_with_extension(search_path, PROJECT_EXTENSION)
}

/// Workspace files under `search_path` with no sibling project file, sorted.
pub fn find_upgradeable_workspaces(search_path: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let workspaces = find_with_extension(search_path, WORKSPACE_EXTENSION)?;
    Ok(workspaces
        .into_iter()
        .filter(|w| !sibling_project(w).exists())
        .collect())
}

fn find_with_extension(search_path: &Path, extension: &str) -> Result<Vec<PathBuf>, DetectError> {
    if !search_path.is_dir() {
        return Err(DetectError::SearchPathMissing {
            path: search_path.to_path_buf(),
        });
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(search_path).max_depth(MAX_DEPTH) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    tracing::debug!(
        root = %search_path.display(),
        extension,
        count = found.len(),
        "discovery finished"
    );
    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// `<dir>/<stem>.sublime-project` for a workspace at `<dir>/<stem>.sublime-workspace`.
pub fn sibling_project(workspace: &Path) -> PathBuf {
    workspace.with_extension(PROJECT_EXTENSION)
}

// ---------------------------------------------------------------------------
// Workspace upgrade
// ---------------------------------------------------------------------------

/// Give `workspace` a sibling project file and point the workspace at it.
///
/// If the workspace's `project` key names an existing file, the sibling
/// becomes a hard link to it. Otherwise an empty project is written, unless a
/// sibling is already there. Returns the absolute sibling path, which is also
/// what the workspace's `project` key is rewritten to.
pub fn upgrade_workspace(workspace: &Path) -> Result<PathBuf, DetectError> {
    if !has_extension(workspace, WORKSPACE_EXTENSION) {
        return Err(DetectError::NotAWorkspace {
            path: workspace.to_path_buf(),
        });
    }

    // The editor resolves the `project` key against the workspace's directory,
    // so everything below works on absolute paths.
    let workspace = &workspace
        .canonicalize()
        .map_err(|e| io_err(workspace, e))?;
    let contents = std::fs::read_to_string(workspace).map_err(|e| io_err(workspace, e))?;
    let mut doc: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| DetectError::Parse {
            path: workspace.to_path_buf(),
            message: e.to_string(),
        })?;
    let Some(fields) = doc.as_object_mut() else {
        return Err(DetectError::Parse {
            path: workspace.to_path_buf(),
            message: "expected a JSON object".to_string(),
        });
    };

    let sibling = sibling_project(workspace);
    let referenced = fields
        .get("project")
        .and_then(serde_json::Value::as_str)
        .filter(|p| !p.is_empty())
        .map(|p| workspace.parent().unwrap_or(Path::new("")).join(p));

    match referenced {
        Some(project) if project.exists() => {
            if project != sibling {
                link_force(&project, &sibling)?;
                tracing::info!(
                    project = %project.display(),
                    link = %sibling.display(),
                    "linked workspace project"
                );
            }
        }
        _ if !sibling.exists() => {
            write_atomic(&sibling, b"{}\n")?;
            tracing::info!(project = %sibling.display(), "wrote empty project for workspace");
        }
        _ => {
            tracing::debug!(project = %sibling.display(), "sibling project already present");
        }
    }

    fields.insert(
        "project".to_string(),
        serde_json::Value::String(sibling.to_string_lossy().into_owned()),
    );
    let json = serde_json::to_string_pretty(&doc).map_err(|e| DetectError::Parse {
        path: workspace.to_path_buf(),
        message: e.to_string(),
    })?;
    write_atomic(workspace, json.as_bytes())?;

    Ok(sibling)
}

/// Hard-link `target` at `link`, replacing whatever `link` was.
fn link_force(target: &Path, link: &Path) -> Result<(), DetectError> {
    if link.exists() {
        std::fs::remove_file(link).map_err(|e| io_err(link, e))?;
    }
    std::fs::hard_link(target, link).map_err(|e| io_err(link, e))
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), DetectError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))
}
