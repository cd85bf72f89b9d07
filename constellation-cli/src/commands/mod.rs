//! Subcommand implementations. Each one loads the store, calls into it, and
//! prints the outcome.

pub mod lifecycle;
pub mod list;
pub mod project;
pub mod session;
pub mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use constellation_core::Store;

use crate::host::CommandHost;

/// Resolved global options.
#[derive(Debug, Clone)]
pub struct Ctx {
    pub home: PathBuf,
    pub editor: String,
}

impl Ctx {
    pub fn load(&self) -> Result<Store> {
        Store::load_at(&self.home).with_context(|| {
            format!(
                "failed to load constellations from {}",
                self.home.join(".constellation").display()
            )
        })
    }

    pub fn host(&self) -> CommandHost {
        CommandHost::new(self.editor.clone())
    }
}
