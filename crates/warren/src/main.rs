//! Warren CLI - Declarative RabbitMQ exchange reconciliation
//!
//! This is the main entry point for the warren command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Run command
    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()),
        Commands::Apply(args) => commands::apply::run(args, cli.config.as_deref()).await,
        Commands::Plan(args) => commands::plan::run(args, cli.config.as_deref()).await,
        Commands::List(args) => commands::list::run(args, cli.config.as_deref()).await,
        Commands::Vhosts(args) => commands::vhosts::run(args, cli.config.as_deref()).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Default to warn so reconciliation output stays readable;
            // use -v/-vv for progress detail
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
