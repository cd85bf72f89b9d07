//! Registry store: the persisted constellation registry and its open-set.
//!
//! # Storage layout
//!
//! ```text
//! <home>/.constellation/
//!   settings.json            (main document, mode 0600)
//!   cache/
//!     open_constellations    (open-set cache, one name per line)
//! ```
//!
//! # Lifecycle
//!
//! A [`Store`] is constructed by [`Store::load_at`] (tests, explicit root) or
//! [`Store::load`] (derives the root from `dirs::home_dir()`), then passed by
//! `&mut` to whatever needs to mutate it. Every mutator persists before it
//! returns. There is no rollback: if a write fails after the in-memory change,
//! call [`Store::reload`] to get back to what is on disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{io_err, not_found, StoreError};
use crate::migrate::migrate_open;
use crate::open_cache;
use crate::paths::{home, settings_path, write_atomic};
use crate::types::{Constellation, ConstellationName, CreatePolicy, Settings, StoredSettings};

/// The constellation registry bound to one storage root.
#[derive(Debug, Clone)]
pub struct Store {
    home: PathBuf,
    settings: Settings,
    open: BTreeSet<ConstellationName>,
}

impl Store {
    // -----------------------------------------------------------------------
    // 1. Load / save
    // -----------------------------------------------------------------------

    /// Load the registry rooted at `home`.
    ///
    /// A missing settings document loads as empty. The open-set is seeded from
    /// the cache file, keeping only names that still exist. If the legacy
    /// `open` flags have not been migrated yet, they are moved into the
    /// open-set and both artifacts are written back.
    pub fn load_at(home: &Path) -> Result<Self, StoreError> {
        let mut stored = read_settings(&settings_path(home))?;

        open_cache::ensure_at(home)?;
        let mut open: BTreeSet<ConstellationName> = open_cache::read_at(home)?
            .into_iter()
            .filter(|name| stored.constellations.contains_key(name.as_str()))
            .map(ConstellationName::from)
            .collect();

        let migrated = migrate_open(&mut stored, &mut open).is_applied();

        let store = Self {
            home: home.to_path_buf(),
            settings: stored.into(),
            open,
        };
        if migrated {
            store.save()?;
        }
        Ok(store)
    }

    /// `load_at` convenience wrapper.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_at(&home()?)
    }

    /// Discard in-memory state and load again from disk.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        *self = Self::load_at(&self.home)?;
        Ok(())
    }

    /// Write the settings document, then the open-set cache.
    ///
    /// The two writes are independent; a crash in between is repaired by the
    /// intersection on the next load.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        write_atomic(&settings_path(&self.home), json.as_bytes())?;
        self.save_open_cache()
    }

    fn save_open_cache(&self) -> Result<(), StoreError> {
        open_cache::write_at(&self.home, self.live_open().map(|name| name.0.as_str()))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // -----------------------------------------------------------------------
    // 2. Views
    // -----------------------------------------------------------------------

    /// Names of all constellations that are not archived.
    pub fn active(&self) -> BTreeSet<String> {
        self.names_where(|c| !c.archived)
    }

    /// Names of all archived constellations.
    pub fn archived(&self) -> BTreeSet<String> {
        self.names_where(|c| c.archived)
    }

    /// Names of open constellations that still exist.
    pub fn open(&self) -> BTreeSet<String> {
        self.live_open().map(|name| name.0.clone()).collect()
    }

    /// Active constellations that are not open.
    pub fn closed(&self) -> BTreeSet<String> {
        let open = self.open();
        self.active().into_iter().filter(|name| !open.contains(name)).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.settings.constellations.contains_key(name)
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.contains(name) && self.open.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Constellation> {
        self.settings.constellations.get(name)
    }

    /// Project paths of `name`, in insertion order.
    pub fn projects_for(&self, name: &str) -> Result<&[PathBuf], StoreError> {
        self.get(name)
            .map(|c| c.projects.as_slice())
            .ok_or_else(|| not_found(name))
    }

    pub fn search_path(&self) -> &str {
        &self.settings.search_path
    }

    pub fn set_search_path(&mut self, path: impl Into<String>) -> Result<(), StoreError> {
        self.settings.search_path = path.into();
        self.save()
    }

    pub fn create_policy(&self) -> CreatePolicy {
        self.settings.create_policy
    }

    pub fn set_create_policy(&mut self, policy: CreatePolicy) -> Result<(), StoreError> {
        self.settings.create_policy = policy;
        self.save()
    }

    fn names_where(&self, keep: impl Fn(&Constellation) -> bool) -> BTreeSet<String> {
        self.settings
            .constellations
            .iter()
            .filter(|(_, c)| keep(c))
            .map(|(name, _)| name.0.clone())
            .collect()
    }

    fn live_open(&self) -> impl Iterator<Item = &ConstellationName> {
        self.open
            .iter()
            .filter(move |name| self.settings.constellations.contains_key(name.0.as_str()))
    }

    // -----------------------------------------------------------------------
    // 3. Registry mutators
    // -----------------------------------------------------------------------

    /// Create an empty constellation, honouring the configured [`CreatePolicy`].
    pub fn create(&mut self, name: &str) -> Result<(), StoreError> {
        self.create_with(name, self.settings.create_policy)
    }

    /// Create an empty constellation with an explicit policy for existing names.
    pub fn create_with(&mut self, name: &str, policy: CreatePolicy) -> Result<(), StoreError> {
        check_name(name)?;
        if self.contains(name) {
            match policy {
                CreatePolicy::Reject => {
                    return Err(StoreError::AlreadyExists {
                        name: name.to_owned(),
                    })
                }
                CreatePolicy::Overwrite => {
                    tracing::warn!(name, "overwriting existing constellation");
                }
            }
        }
        self.settings
            .constellations
            .insert(ConstellationName::from(name), Constellation::default());
        self.save()?;
        tracing::info!(name, "created constellation");
        Ok(())
    }

    /// Remove a constellation. It is also dropped from the open-set.
    pub fn destroy(&mut self, name: &str) -> Result<(), StoreError> {
        if self.settings.constellations.shift_remove(name).is_none() {
            return Err(not_found(name));
        }
        self.open.remove(name);
        self.save()?;
        tracing::info!(name, "destroyed constellation");
        Ok(())
    }

    /// Rename a constellation, keeping its position, record, and open status.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if !self.contains(old) {
            return Err(not_found(old));
        }
        if old == new {
            return Ok(());
        }
        check_name(new)?;
        if self.contains(new) {
            return Err(StoreError::AlreadyExists {
                name: new.to_owned(),
            });
        }

        let Some((index, _, record)) = self.settings.constellations.shift_remove_full(old) else {
            return Err(not_found(old));
        };
        self.settings
            .constellations
            .shift_insert(index, ConstellationName::from(new), record);
        if self.open.remove(old) {
            self.open.insert(ConstellationName::from(new));
        }

        self.save()?;
        tracing::info!(old, new, "renamed constellation");
        Ok(())
    }

    pub fn archive(&mut self, name: &str) -> Result<(), StoreError> {
        self.set_archived(name, true)
    }

    pub fn unarchive(&mut self, name: &str) -> Result<(), StoreError> {
        self.set_archived(name, false)
    }

    fn set_archived(&mut self, name: &str, archived: bool) -> Result<(), StoreError> {
        self.record_mut(name)?.archived = archived;
        self.save()
    }

    // -----------------------------------------------------------------------
    // 4. Open / close
    // -----------------------------------------------------------------------

    /// Mark `name` open. Opening an open constellation changes nothing.
    pub fn open_constellation(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.contains(name) {
            return Err(not_found(name));
        }
        self.open.insert(ConstellationName::from(name));
        self.save_open_cache()?;
        tracing::info!(name, "opened constellation");
        Ok(())
    }

    /// Mark `name` closed. Fails with [`StoreError::NotOpen`] if it was not open.
    pub fn close_constellation(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.contains(name) {
            return Err(not_found(name));
        }
        if !self.open.remove(name) {
            return Err(StoreError::NotOpen {
                name: name.to_owned(),
            });
        }
        self.save_open_cache()?;
        tracing::info!(name, "closed constellation");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 5. Projects
    // -----------------------------------------------------------------------

    /// Append `project` to `name`. Duplicates are kept.
    ///
    /// An empty name or path is ignored.
    pub fn add_project(&mut self, name: &str, project: impl AsRef<Path>) -> Result<(), StoreError> {
        let project = project.as_ref();
        if name.is_empty() || project.as_os_str().is_empty() {
            tracing::debug!("add_project called with an empty argument; ignoring");
            return Ok(());
        }
        self.record_mut(name)?.projects.push(project.to_path_buf());
        self.save()?;
        tracing::info!(name, project = %project.display(), "added project");
        Ok(())
    }

    /// Remove the first occurrence of `project` from `name`.
    ///
    /// An empty name or path is ignored.
    pub fn remove_project(
        &mut self,
        name: &str,
        project: impl AsRef<Path>,
    ) -> Result<(), StoreError> {
        let project = project.as_ref();
        if name.is_empty() || project.as_os_str().is_empty() {
            tracing::debug!("remove_project called with an empty argument; ignoring");
            return Ok(());
        }
        let projects = &mut self.record_mut(name)?.projects;
        let Some(index) = projects.iter().position(|p| p == project) else {
            return Err(StoreError::ProjectNotFound {
                name: name.to_owned(),
                project: project.to_path_buf(),
            });
        };
        projects.remove(index);
        self.save()?;
        tracing::info!(name, project = %project.display(), "removed project");
        Ok(())
    }

    fn record_mut(&mut self, name: &str) -> Result<&mut Constellation, StoreError> {
        self.settings
            .constellations
            .get_mut(name)
            .ok_or_else(|| not_found(name))
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Names go one per line into the open-set cache, so they must be a single
/// non-empty line to survive a reload.
fn check_name(name: &str) -> Result<(), StoreError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['\n', '\r']) {
        "name contains a line break"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidName {
        name: name.to_owned(),
        reason,
    })
}

fn read_settings(path: &Path) -> Result<StoredSettings, StoreError> {
    if !path.exists() {
        return Ok(StoredSettings::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(StoredSettings::default());
    }
    serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_home() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn fresh_home_loads_empty_and_creates_cache() {
        let home = make_home();
        let store = Store::load_at(home.path()).expect("load");
        assert!(store.active().is_empty());
        assert!(crate::paths::open_cache_path(home.path()).exists());
    }

    #[test]
    fn fresh_home_is_marked_migrated() {
        let home = make_home();
        let store = Store::load_at(home.path()).expect("load");
        assert!(store.settings().did_migrate_open);
        assert!(settings_path(home.path()).exists());
    }

    #[test]
    fn empty_settings_file_loads_as_empty() {
        let home = make_home();
        let path = settings_path(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "").unwrap();
        let store = Store::load_at(home.path()).expect("load");
        assert!(store.active().is_empty());
    }

    #[test]
    fn corrupt_settings_returns_parse_error() {
        let home = make_home();
        let path = settings_path(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        let err = Store::load_at(home.path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("settings.json"));
    }

    #[test]
    fn rename_keeps_document_position() {
        let home = make_home();
        let mut store = Store::load_at(home.path()).unwrap();
        for name in ["a", "b", "c"] {
            store.create(name).unwrap();
        }
        store.rename("b", "bee").unwrap();
        let order: Vec<_> = store
            .settings()
            .constellations
            .keys()
            .map(|k| k.0.as_str())
            .collect();
        assert_eq!(order, ["a", "bee", "c"]);
    }

    #[test]
    fn rename_to_same_name_is_a_no_op() {
        let home = make_home();
        let mut store = Store::load_at(home.path()).unwrap();
        store.create("work").unwrap();
        store.open_constellation("work").unwrap();
        store.rename("work", "work").unwrap();
        assert!(store.is_open("work"));
    }

    #[test]
    fn open_unknown_returns_not_found() {
        let home = make_home();
        let mut store = Store::load_at(home.path()).unwrap();
        let err = store.open_constellation("ghost").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
