//! Open-set cache: which constellations are open, kept outside the settings document.
//!
//! Persists a plain-text file at `<home>/.constellation/cache/open_constellations`,
//! one name per line, no header, rewritten wholesale on every change. The
//! settings document stays authoritative for existence: readers intersect
//! these names with the live constellation keys.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{io_err, StoreError};
use crate::paths::{cache_dir, open_cache_path, set_dir_permissions, write_atomic};

/// Create the cache directory and an empty cache file if either is missing.
///
/// Another process recreating them in between is not an error.
pub fn ensure_at(home: &Path) -> Result<(), StoreError> {
    let dir = cache_dir(home);
    if !dir.is_dir() {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        set_dir_permissions(&dir)?;
        tracing::debug!(path = %dir.display(), "created open-set cache directory");
    }
    let path = open_cache_path(home);
    if !path.exists() {
        write_atomic(&path, b"")?;
    }
    Ok(())
}

/// Read the cached open names.
///
/// Returns an empty set if the file does not exist.
pub fn read_at(home: &Path) -> Result<BTreeSet<String>, StoreError> {
    let path = open_cache_path(home);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(io_err(&path, e)),
    };
    Ok(contents
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Rewrite the cache with `names`, one per line.
pub fn write_at<'a, I>(home: &Path, names: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut contents = String::new();
    for name in names {
        contents.push_str(name);
        contents.push('\n');
    }
    write_atomic(&open_cache_path(home), contents.as_bytes())
}
