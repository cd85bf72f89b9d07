//! `constellation add|remove|projects|find|upgrade`

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;

use constellation_core::{session, Store};
use constellation_detector::{find_projects, find_upgradeable_workspaces, upgrade_workspace};

use super::Ctx;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Constellation to add to.
    pub name: String,

    /// Path to a .sublime-project file.
    pub project: PathBuf,
}

impl AddArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let project = self
            .project
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.project.display()))?;

        let mut store = ctx.load()?;
        let mut host = ctx.host();
        session::add_and_follow(&mut store, &mut host, &self.name, &project)
            .with_context(|| format!("failed to add project to '{}'", self.name))?;
        println!("{} Added {} to '{}'", "✓".green(), project.display(), self.name);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Constellation to remove from.
    pub name: String,

    /// Project path as listed by `constellation projects <name>`.
    pub project: PathBuf,
}

impl RemoveArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        let project = stored_form(&store, &self.name, &self.project);
        store
            .remove_project(&self.name, &project)
            .with_context(|| format!("failed to remove project from '{}'", self.name))?;
        println!("{} Removed {} from '{}'", "✓".green(), project.display(), self.name);
        Ok(())
    }
}

/// The path as written, unless only its canonical form is in the constellation.
fn stored_form(store: &Store, name: &str, project: &Path) -> PathBuf {
    let listed = store.projects_for(name).unwrap_or_default();
    if listed.iter().any(|p| p == project) {
        return project.to_path_buf();
    }
    match project.canonicalize() {
        Ok(canonical) if listed.contains(&canonical) => canonical,
        _ => project.to_path_buf(),
    }
}

#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Constellation to list.
    pub name: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ProjectsArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let store = ctx.load()?;
        let projects = store
            .projects_for(&self.name)
            .with_context(|| format!("failed to list projects of '{}'", self.name))?;

        if self.json {
            let paths: Vec<String> = projects.iter().map(|p| p.display().to_string()).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&paths).context("failed to serialize projects JSON")?
            );
            return Ok(());
        }

        if projects.is_empty() {
            println!("'{}' has no projects.", self.name);
            println!("Run: constellation add {} <project>", self.name);
            return Ok(());
        }
        for project in projects {
            let file = project
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("{}  {}", file.bold(), project.display().to_string().bright_black());
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Constellation the discovered projects are meant for.
    pub name: String,

    /// Add every discovered project instead of just listing them.
    #[arg(long)]
    pub add: bool,
}

impl FindArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        let root = search_root(&store)?;

        let included = store
            .projects_for(&self.name)
            .with_context(|| format!("cannot search for '{}'", self.name))?
            .to_vec();
        let found: Vec<PathBuf> = find_projects(&root)
            .with_context(|| format!("project search under {} failed", root.display()))?
            .into_iter()
            .filter(|p| !included.contains(p))
            .collect();

        if found.is_empty() {
            println!("No new projects under {}.", root.display());
            return Ok(());
        }

        if !self.add {
            for project in &found {
                println!("{}", display_relative(project, &root));
            }
            println!("Run: constellation find {} --add", self.name);
            return Ok(());
        }

        let mut host = ctx.host();
        for project in &found {
            session::add_and_follow(&mut store, &mut host, &self.name, project)
                .with_context(|| format!("failed to add {}", project.display()))?;
        }
        println!(
            "{} Added {} project(s) to '{}'",
            "✓".green(),
            found.len(),
            self.name
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Constellation to add the upgraded workspace's project to.
    pub name: String,

    /// Workspace file to upgrade. Omit to list upgradeable workspaces.
    pub workspace: Option<PathBuf>,
}

impl UpgradeArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let mut store = ctx.load()?;
        if !store.contains(&self.name) {
            return Err(anyhow!("constellation '{}' not found", self.name));
        }

        let Some(workspace) = self.workspace else {
            let root = search_root(&store)?;
            let workspaces = find_upgradeable_workspaces(&root)
                .with_context(|| format!("workspace search under {} failed", root.display()))?;
            if workspaces.is_empty() {
                println!("Nothing found to upgrade under {}.", root.display());
            }
            for ws in &workspaces {
                println!("{}", display_relative(ws, &root));
            }
            return Ok(());
        };

        let workspace = workspace
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", workspace.display()))?;
        let project = upgrade_workspace(&workspace)
            .with_context(|| format!("failed to upgrade {}", workspace.display()))?;
        let mut host = ctx.host();
        session::add_and_follow(&mut store, &mut host, &self.name, &project)
            .with_context(|| format!("failed to add project to '{}'", self.name))?;
        println!(
            "{} Upgraded {} and added {} to '{}'",
            "✓".green(),
            workspace.display(),
            project.display(),
            self.name
        );
        Ok(())
    }
}

fn search_root(store: &Store) -> Result<PathBuf> {
    let root = store.search_path();
    if root.is_empty() {
        return Err(anyhow!(
            "no search path set. Run `constellation search-path <dir>` first."
        ));
    }
    Ok(PathBuf::from(root))
}

fn display_relative(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => format!("{}  {}", rel.display(), path.display().to_string().bright_black()),
        Err(_) => path.display().to_string(),
    }
}
