//! Drydock CLI - an integration-test harness for compiler plugins

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

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("drydock=debug")
    } else {
        EnvFilter::new("drydock=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Probe(args) => commands::probe::execute(args),
        Commands::Render(args) => commands::render::execute(args),
        Commands::Run(args) => commands::run::execute(args, cli.verbose),
        Commands::Check(args) => commands::check::execute(args, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
