//! Constellation: open and close groups of editor projects together.
//!
//! # Usage
//!
//! ```text
//! constellation list [--open|--closed|--archived|--active] [--json]
//! constellation info
//! constellation create <name> [--overwrite]
//! constellation destroy <name>
//! constellation rename <old> <new>
//! constellation archive|unarchive <name>
//! constellation open|close <name>
//! constellation add|remove <name> <project>
//! constellation projects <name>
//! constellation find <name> [--add]
//! constellation upgrade <name> <workspace>
//! constellation search-path [<path>]
//! constellation policy [reject|overwrite]
//! ```

mod commands;
mod host;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{
    lifecycle::{ArchiveArgs, CreateArgs, DestroyArgs, RenameArgs},
    list::{InfoArgs, ListArgs},
    project::{AddArgs, FindArgs, ProjectsArgs, RemoveArgs, UpgradeArgs},
    session::{CloseArgs, OpenArgs},
    settings::{PolicyArgs, SearchPathArgs},
    Ctx,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "constellation",
    version,
    about = "Group editor projects into constellations you open and close together",
    long_about = None,
)]
struct Cli {
    /// Storage root; settings live in <home>/.constellation/.
    #[arg(long, global = true, env = "CONSTELLATION_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    /// Editor executable used to open projects (called as `<editor> -n <project>`).
    #[arg(
        long,
        global = true,
        env = "CONSTELLATION_EDITOR",
        default_value = "subl",
        value_name = "PROGRAM"
    )]
    editor: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List constellations and their status.
    List(ListArgs),

    /// Print "Open Constellations: open/active".
    Info(InfoArgs),

    /// Create an empty constellation.
    Create(CreateArgs),

    /// Remove a constellation.
    Destroy(DestroyArgs),

    /// Rename a constellation, keeping its projects and open status.
    Rename(RenameArgs),

    /// Hide a constellation from the active set.
    Archive(ArchiveArgs),

    /// Return an archived constellation to the active set.
    Unarchive(ArchiveArgs),

    /// Open a constellation and all of its projects.
    Open(OpenArgs),

    /// Close a constellation.
    Close(CloseArgs),

    /// Add a project file to a constellation.
    Add(AddArgs),

    /// Remove a project file from a constellation.
    Remove(RemoveArgs),

    /// List the project files of a constellation.
    Projects(ProjectsArgs),

    /// Discover project files under the search path.
    Find(FindArgs),

    /// Give a bare workspace a project file and add it to a constellation.
    Upgrade(UpgradeArgs),

    /// Show or set the discovery search path.
    SearchPath(SearchPathArgs),

    /// Show or set what `create` does when the name already exists.
    Policy(PolicyArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let home = match cli.home {
        Some(home) => home,
        None => dirs::home_dir().context("could not determine home directory")?,
    };
    let ctx = Ctx {
        home,
        editor: cli.editor,
    };

    match cli.command {
        Commands::List(args) => args.run(&ctx),
        Commands::Info(args) => args.run(&ctx),
        Commands::Create(args) => args.run(&ctx),
        Commands::Destroy(args) => args.run(&ctx),
        Commands::Rename(args) => args.run(&ctx),
        Commands::Archive(args) => args.run(&ctx, true),
        Commands::Unarchive(args) => args.run(&ctx, false),
        Commands::Open(args) => args.run(&ctx),
        Commands::Close(args) => args.run(&ctx),
        Commands::Add(args) => args.run(&ctx),
        Commands::Remove(args) => args.run(&ctx),
        Commands::Projects(args) => args.run(&ctx),
        Commands::Find(args) => args.run(&ctx),
        Commands::Upgrade(args) => args.run(&ctx),
        Commands::SearchPath(args) => args.run(&ctx),
        Commands::Policy(args) => args.run(&ctx),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
