//! Storage layout under the home root.

use std::path::{Path, PathBuf};

use crate::error::{io_err, StoreError};

pub const SETTINGS_FILE: &str = "settings.json";
pub const OPEN_CACHE_FILE: &str = "open_constellations";

pub fn constellation_root(home: &Path) -> PathBuf {
    home.join(".constellation")
}

pub fn settings_path(home: &Path) -> PathBuf {
    constellation_root(home).join(SETTINGS_FILE)
}

pub fn cache_dir(home: &Path) -> PathBuf {
    constellation_root(home).join("cache")
}

pub fn open_cache_path(home: &Path) -> PathBuf {
    cache_dir(home).join(OPEN_CACHE_FILE)
}

/// Atomically write `contents` to `path`.
///
/// Write flow: `<file>.tmp` sibling → `chmod 0600` → `rename`. Creates the
/// parent directory if absent.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
            set_dir_permissions(dir)?;
        }
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// The user's home directory, or [`StoreError::HomeNotFound`].
pub fn home() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeNotFound)
}

#[cfg(unix)]
pub(crate) fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
pub(crate) fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}
