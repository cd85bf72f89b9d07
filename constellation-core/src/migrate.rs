//! One-shot migration of the legacy per-record `open` flag into the open-set.
//!
//! Older documents stored `"open": true|false` inside each constellation
//! record. The current layout keeps openness in the side cache instead. The
//! `did_migrate_open` flag in the document gates re-entry.

use std::collections::BTreeSet;

use crate::types::{ConstellationName, StoredSettings};

/// Result of [`migrate_open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The document was already migrated; nothing changed.
    Skipped,
    /// The document was scanned and the flag set.
    Applied {
        /// Names moved into the open-set.
        opened: Vec<ConstellationName>,
        /// Number of records that carried an `open` field.
        stripped: usize,
    },
}

impl MigrationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MigrationOutcome::Applied { .. })
    }
}

/// Move legacy `open` flags into `open_set`, strip them, and set `did_migrate_open`.
///
/// Idempotent: once the flag is set, later calls return [`MigrationOutcome::Skipped`].
pub fn migrate_open(
    stored: &mut StoredSettings,
    open_set: &mut BTreeSet<ConstellationName>,
) -> MigrationOutcome {
    if stored.did_migrate_open {
        tracing::debug!("open-flag migration already applied");
        return MigrationOutcome::Skipped;
    }

    let mut opened = Vec::new();
    let mut stripped = 0;
    for (name, record) in stored.constellations.iter_mut() {
        if let Some(was_open) = record.open.take() {
            stripped += 1;
            if was_open {
                open_set.insert(name.clone());
                opened.push(name.clone());
            }
        }
    }
    stored.did_migrate_open = true;

    tracing::info!(
        opened = opened.len(),
        stripped,
        "migrated legacy open flags into the open-set cache"
    );
    MigrationOutcome::Applied { opened, stripped }
}
