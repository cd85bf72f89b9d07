//! `constellation create|destroy|rename|archive|unarchive`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use constellation_core::CreatePolicy;

use super::Ctx;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the new constellation.
    pub name: String,

    /// Replace an existing constellation of the same name instead of failing.
    #[arg(long)]
    pub overwrite: bool,
}

impl CreateArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        let policy = if self.overwrite {
            CreatePolicy::Overwrite
        } else {
            store.create_policy()
        };
        store
            .create_with(&self.name, policy)
            .with_context(|| format!("failed to create '{}'", self.name))?;
        println!("{} Created '{}'", "✓".green(), self.name);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DestroyArgs {
    /// Constellation to remove.
    pub name: String,
}

impl DestroyArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        store
            .destroy(&self.name)
            .with_context(|| format!("failed to destroy '{}'", self.name))?;
        println!("{} Destroyed '{}'", "✓".green(), self.name);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Current name.
    pub old: String,

    /// New name.
    pub new: String,
}

impl RenameArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        store
            .rename(&self.old, &self.new)
            .with_context(|| format!("failed to rename '{}' to '{}'", self.old, self.new))?;
        println!("{} Renamed '{}' → '{}'", "✓".green(), self.old, self.new);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Constellation to archive or unarchive.
    pub name: String,
}

impl ArchiveArgs {
    pub fn run(self, ctx: &Ctx, archive: bool) -> Result<()> {
        let mut store = ctx.load()?;
        if archive {
            store
                .archive(&self.name)
                .with_context(|| format!("failed to archive '{}'", self.name))?;
            println!("{} Archived '{}'", "✓".green(), self.name);
        } else {
            store
                .unarchive(&self.name)
                .with_context(|| format!("failed to unarchive '{}'", self.name))?;
            println!("{} Unarchived '{}'", "✓".green(), self.name);
        }
        Ok(())
    }
}
