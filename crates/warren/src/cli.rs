//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Warren - Declarative RabbitMQ exchange reconciliation
#[derive(Parser, Debug)]
#[command(name = "warren")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to warren.yaml manifest
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Manifest management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Reconcile declared exchanges against the cluster
    Apply(ApplyArgs),

    /// Show what a reconciliation pass would change
    Plan(PlanArgs),

    /// List discovered exchanges
    List(ListArgs),

    /// List virtual hosts
    Vhosts(VhostsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the manifest
    Validate,

    /// Show the resolved manifest
    Show,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Show planned mutations without issuing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Restrict output to one vhost
    #[arg(short = 'p', long)]
    pub vhost: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VhostsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_dry_run_parses() {
        let cli = Cli::try_parse_from(["warren", "apply", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Apply(args) => assert!(args.dry_run),
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["warren", "-vv", "--config", "custom.yaml", "plan"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref().map(|p| p.as_str()), Some("custom.yaml"));
    }

    #[test]
    fn test_list_vhost_filter() {
        let cli = Cli::try_parse_from(["warren", "list", "-p", "/", "--json"]).unwrap();
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.vhost.as_deref(), Some("/"));
                assert!(args.json);
            }
            _ => panic!("expected list"),
        }
    }
}
