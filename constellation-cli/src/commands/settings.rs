//! `constellation search-path [<path>]` and `constellation policy [reject|overwrite]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;

use constellation_core::CreatePolicy;

use super::Ctx;

#[derive(Args, Debug)]
pub struct SearchPathArgs {
    /// New search root. Omit to print the current one.
    pub path: Option<PathBuf>,
}

impl SearchPathArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        let Some(path) = self.path else {
            if store.search_path().is_empty() {
                println!("No search path set.");
                println!("Run: constellation search-path <dir>");
            } else {
                println!("{}", store.search_path());
            }
            return Ok(());
        };

        let path = path
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", path.display()))?;
        store
            .set_search_path(path.to_string_lossy().into_owned())
            .context("failed to save search path")?;
        println!("{} Search path set to {}", "✓".green(), path.display());
        Ok(())
    }
}

/// CLI spelling of [`CreatePolicy`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Reject,
    Overwrite,
}

impl From<PolicyArg> for CreatePolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Reject => CreatePolicy::Reject,
            PolicyArg::Overwrite => CreatePolicy::Overwrite,
        }
    }
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// New policy for `create` on an existing name. Omit to print the current one.
    #[arg(value_enum)]
    pub policy: Option<PolicyArg>,
}

impl PolicyArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        match self.policy {
            None => println!("{}", store.create_policy()),
            Some(policy) => {
                store
                    .set_create_policy(policy.into())
                    .context("failed to save create policy")?;
                println!("{} Create policy set to {}", "✓".green(), store.create_policy());
            }
        }
        Ok(())
    }
}
