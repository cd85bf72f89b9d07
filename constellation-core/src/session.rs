//! Store operations paired with the editor: open a constellation and its
//! project windows together, close them together, and so on.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{host_err, not_found, StoreError};
use crate::host::ProjectHost;
use crate::store::Store;

/// Counts behind the "Open Constellations: x/y" status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub open: usize,
    pub active: usize,
    pub archived: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Open Constellations: {}/{}", self.open, self.active)
    }
}

pub fn summary(store: &Store) -> Summary {
    Summary {
        open: store.open().len(),
        active: store.active().len(),
        archived: store.archived().len(),
    }
}

/// Mark `name` open, then open each of its projects in order.
///
/// A constellation that is already open keeps its windows; the host is not
/// asked to open them again.
pub fn open<H: ProjectHost + ?Sized>(
    store: &mut Store,
    host: &mut H,
    name: &str,
) -> Result<(), StoreError> {
    let was_open = store.is_open(name);
    store.open_constellation(name)?;
    if was_open {
        tracing::debug!(name, "constellation already open; leaving windows alone");
        return Ok(());
    }
    for project in store.projects_for(name)?.to_vec() {
        host.open_project(&project)
            .map_err(|source| host_err(&project, source))?;
    }
    Ok(())
}

/// Close every project of `name` the host has open, then mark it closed.
pub fn close<H: ProjectHost + ?Sized>(
    store: &mut Store,
    host: &mut H,
    name: &str,
) -> Result<(), StoreError> {
    if !store.contains(name) {
        return Err(not_found(name));
    }
    if !store.is_open(name) {
        return Err(StoreError::NotOpen {
            name: name.to_owned(),
        });
    }

    let showing = host.open_projects();
    for project in store.projects_for(name)?.to_vec() {
        if showing.contains(&project) {
            host.close_project(&project)
                .map_err(|source| host_err(&project, source))?;
        } else {
            tracing::debug!(project = %project.display(), "project not open in editor; skipping");
        }
    }
    store.close_constellation(name)
}

/// Add `project` to `name`; if the constellation is open, open the project too.
pub fn add_and_follow<H: ProjectHost + ?Sized>(
    store: &mut Store,
    host: &mut H,
    name: &str,
    project: &Path,
) -> Result<(), StoreError> {
    store.add_project(name, project)?;
    if store.is_open(name) && !project.as_os_str().is_empty() {
        host.open_project(project)
            .map_err(|source| host_err(project, source))?;
    }
    Ok(())
}

/// Projects the host has open that `name` does not include yet, sorted.
pub fn open_projects_outside<H: ProjectHost + ?Sized>(
    store: &Store,
    host: &H,
    name: &str,
) -> Result<Vec<PathBuf>, StoreError> {
    let included = store.projects_for(name)?;
    let mut outside: Vec<PathBuf> = host
        .open_projects()
        .into_iter()
        .filter(|p| !included.contains(p))
        .collect();
    outside.sort();
    outside.dedup();
    Ok(outside)
}
