//! `constellation open <name>` and `constellation close <name>`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use constellation_core::{session, ProjectHost};

use super::Ctx;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Closed constellation to open.
    pub name: String,
}

impl OpenArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        if store.is_open(&self.name) {
            println!("'{}' is already open.", self.name);
            return Ok(());
        }
        let mut host = ctx.host();
        session::open(&mut store, &mut host, &self.name)
            .with_context(|| format!("failed to open '{}'", self.name))?;

        let count = store.projects_for(&self.name)?.len();
        println!(
            "{} Opened '{}' ({} project{})",
            "✓".green(),
            self.name,
            count,
            if count == 1 { "" } else { "s" }
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Open constellation to close.
    pub name: String,
}

impl CloseArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        let mut host = ctx.host();
        session::close(&mut store, &mut host, &self.name)
            .with_context(|| format!("failed to close '{}'", self.name))?;

        println!("{} Closed '{}'", "✓".green(), self.name);
        let projects = store.projects_for(&self.name)?;
        if !host.can_close() && !projects.is_empty() {
            println!(
                "{}",
                "The editor cannot be asked to close windows; close these yourself:".yellow()
            );
            for project in projects {
                println!("  {} {}", "close window:".bright_black(), project.display());
            }
        }
        Ok(())
    }
}
