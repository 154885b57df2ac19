//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Moor - git-hosted imports for C/C++ CMake projects
#[derive(Parser)]
#[command(name = "moor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Tool home directory (defaults to ~/.moor)
    #[arg(long, global = true, env = "MOOR_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Workspace directory (defaults to the parent of the project)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone all missing imports into the workspace
    Fetch(ProjectArgs),

    /// Write .moor-imports.cmake and .moor-gen.py
    Gen(GenArgs),

    /// Check imports for missing or out-of-sync checkouts
    Diag(ProjectArgs),

    /// Display the import tree
    List(ListArgs),
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Resolve and merge, but don't write any files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,
}
