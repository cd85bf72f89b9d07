//! Editor host backed by spawning the editor executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use constellation_core::{HostError, ProjectHost};

/// Opens projects with `<program> -n <project>`.
///
/// A separate process has no view of the editor's windows, so this host never
/// reports any project as open and cannot close windows itself.
#[derive(Debug, Clone)]
pub struct CommandHost {
    program: String,
}

impl CommandHost {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ProjectHost for CommandHost {
    fn open_project(&mut self, path: &Path) -> Result<(), HostError> {
        tracing::debug!(program = %self.program, project = %path.display(), "spawning editor");
        Command::new(&self.program)
            .arg("-n")
            .arg(path)
            .spawn()
            .map_err(|e| format!("failed to run '{}': {e}", self.program))?;
        Ok(())
    }

    fn close_project(&mut self, path: &Path) -> Result<(), HostError> {
        tracing::debug!(project = %path.display(), "editor has no close hook; leaving window open");
        Ok(())
    }

    fn open_projects(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn can_close(&self) -> bool {
        false
    }
}
