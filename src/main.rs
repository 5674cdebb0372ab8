// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Posgraph CLI - query a points-of-sale cost graph

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use posgraph::commands::{self, Output};
use posgraph::config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "posgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "POSGRAPH_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Topology file with points and edges
    #[arg(short, long, env = "POSGRAPH_TOPOLOGY")]
    topology: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all points of sale
    Points,

    /// Show one point
    Show {
        /// Point id or code
        point: String,
    },

    /// Print the canonical id for an id or code
    Resolve {
        /// Point id or code
        point: String,
    },

    /// List the neighbors of a point with edge costs
    Neighbors {
        /// Point id or code
        point: String,
    },

    /// Find every minimum-cost path between two points
    Paths {
        /// Source point id or code
        from: String,

        /// Destination point id or code
        to: String,
    },

    /// Export the cost graph
    Export {
        /// Output format (dot, json)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let out = Output {
        json: cli.json,
        color: !cli.no_color && !cli.json,
    };

    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell, &mut Cli::command());
    }

    let graph = commands::open_graph(cli.topology.as_deref(), &config)?;

    // Execute command
    match cli.command {
        Commands::Points => commands::points::run_list(&graph, out),
        Commands::Show { point } => commands::points::run_show(&graph, &point, out),
        Commands::Resolve { point } => commands::points::run_resolve(&graph, &point, out),
        Commands::Neighbors { point } => commands::neighbors::run(&graph, &point, out),
        Commands::Paths { from, to } => commands::paths::run(&graph, &from, &to, out),
        Commands::Export { format, output } => commands::export::run(&graph, &format, output),
        Commands::Completions { .. } => Ok(()),
    }
}
