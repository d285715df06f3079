//! CaseGuard CLI - Command-line interface for CaseGuard access control
//!
//! Usage:
//!   caseguard init [dir]                              - Write a starter config and fixture
//!   caseguard policy roles                            - List roles and their permissions
//!   caseguard policy operations                       - List sensitive operations
//!   caseguard policy check --role <role> [-o <op>]... - Check role permissions
//!   caseguard resolve --directory <file> --user <id>  - Resolve a user's role
//!   caseguard dashboard --role <role>                 - Preview a role's dashboard

use clap::{Parser, Subcommand};
use cli::commands::{DashboardCommand, GlobalOptions, InitCommand, PolicyCommand, ResolveCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "caseguard")]
#[command(about = "CaseGuard - Role-based access control for forensic case management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (YAML or JSON); defaults to ./caseguard.yaml if present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new CaseGuard configuration
    Init(InitCommand),
    /// Permission table inspection
    Policy(PolicyCommand),
    /// Resolve a user's effective role from a directory fixture
    Resolve(ResolveCommand),
    /// Preview the dashboard for a role
    Dashboard(DashboardCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = GlobalOptions {
        config: cli.config,
        json: cli.json,
    };

    match cli.command {
        Commands::Init(cmd) => cmd.run(),
        Commands::Policy(cmd) => cmd.run(&opts),
        Commands::Resolve(cmd) => cmd.run(&opts).await,
        Commands::Dashboard(cmd) => cmd.run(&opts),
    }
}
