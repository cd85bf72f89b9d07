//! `constellation list` and `constellation info`

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use constellation_core::{session, Store};

use super::Ctx;

/// Arguments for `constellation list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only open constellations.
    #[arg(long, group = "filter")]
    pub open: bool,

    /// Only active constellations that are not open.
    #[arg(long, group = "filter")]
    pub closed: bool,

    /// Only archived constellations.
    #[arg(long, group = "filter")]
    pub archived: bool,

    /// Only constellations that are not archived.
    #[arg(long, group = "filter")]
    pub active: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ConstellationJson {
    name: String,
    status: &'static str,
    archived: bool,
    open: bool,
    projects: Vec<String>,
}

#[derive(Tabled)]
struct ConstellationRow {
    #[tabled(rename = "constellation")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "projects")]
    projects: usize,
}

impl ListArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let store = ctx.load()?;
        let names = self.selected(&store);

        if self.json {
            let payload: Vec<ConstellationJson> = names
                .iter()
                .filter_map(|name| {
                    let record = store.get(name)?;
                    let open = store.is_open(name);
                    Some(ConstellationJson {
                        name: name.clone(),
                        status: status_key(record.archived, open),
                        archived: record.archived,
                        open,
                        projects: record
                            .projects
                            .iter()
                            .map(|p| p.display().to_string())
                            .collect(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
            );
            return Ok(());
        }

        if names.is_empty() {
            println!("No constellations.");
            if store.settings().constellations.is_empty() {
                println!("Run: constellation create <name>");
            }
            return Ok(());
        }

        let rows: Vec<ConstellationRow> = names
            .iter()
            .filter_map(|name| {
                let record = store.get(name)?;
                Some(ConstellationRow {
                    name: name.clone(),
                    status: status_label(record.archived, store.is_open(name)),
                    projects: record.projects.len(),
                })
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }

    fn selected(&self, store: &Store) -> BTreeSet<String> {
        if self.open {
            store.open()
        } else if self.closed {
            store.closed()
        } else if self.archived {
            store.archived()
        } else if self.active {
            store.active()
        } else {
            &store.active() | &store.archived()
        }
    }
}

fn status_key(archived: bool, open: bool) -> &'static str {
    match (archived, open) {
        (false, true) => "open",
        (false, false) => "closed",
        (true, false) => "archived",
        (true, true) => "archived_open",
    }
}

fn status_label(archived: bool, open: bool) -> String {
    match (archived, open) {
        (false, true) => "OPEN".green().bold().to_string(),
        (false, false) => "CLOSED".to_string(),
        (true, false) => "ARCHIVED".bright_black().to_string(),
        (true, true) => "ARCHIVED (open)".yellow().to_string(),
    }
}

/// Arguments for `constellation info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// List the open constellations with their project counts.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl InfoArgs {
    pub fn run(self, ctx: &Ctx) -> Result<()> {
        let store = ctx.load()?;
        println!("{}", session::summary(&store));
        if self.verbose {
            for name in store.open() {
                let count = store.projects_for(&name)?.len();
                println!("    {} [{}]", name, "∗".repeat(count));
            }
        }
        Ok(())
    }
}
