//! Moor CLI - git-hosted imports for C/C++ CMake projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging, stdout is reserved for command output
    let filter = if cli.global.verbose {
        EnvFilter::new("moor=debug")
    } else {
        EnvFilter::new("moor=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Fetch(args) => commands::fetch::execute(&cli.global, args),
        Commands::Gen(args) => commands::gen::execute(&cli.global, args),
        Commands::Diag(args) => commands::diag::execute(&cli.global, args),
        Commands::List(args) => commands::list::execute(&cli.global, args),
    }
}
