//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{conflicts_cmd, list_cmd, run_cmd, wrapper_cmd};
use crate::config::Config;
use crate::resolve;

#[derive(Parser)]
#[command(name = "corral")]
#[command(author, version, about = "Turn directories of scripts into a structured CLI")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose discovery diagnostics
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Command root directory, highest priority first (repeatable)
    #[arg(
        long = "root",
        global = true,
        env = "CORRAL_ROOTS",
        value_delimiter = ':',
        value_name = "DIR"
    )]
    pub roots: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a command path and run its script
    Run {
        /// Command path segments followed by script arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// List resolved commands
    List {
        /// Only show commands under this path prefix
        prefix: Vec<String>,
    },

    /// Show details for one command
    Info {
        /// Command path segments
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Show recorded resolution conflicts
    Conflicts,

    /// Generate a pass-through wrapper script for a namespace
    Wrapper {
        /// Top-level namespace to wrap (e.g. "git")
        namespace: String,

        /// Output directory for the wrapper artifact
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load()?;
    let roots = config.effective_roots(&cli.roots);
    output.verbose(&format!("scanning {} root(s)", roots.len()));

    let table = resolve::resolve(&roots);
    for diagnostic in table.diagnostics() {
        output.verbose_ctx("discovery", diagnostic);
    }

    match cli.command {
        Commands::Run { tokens } => run_cmd::run(&output, &table, &tokens),

        Commands::List { prefix } => list_cmd::list(&output, &table, &prefix),

        Commands::Info { tokens } => list_cmd::info(&output, &table, &tokens),

        Commands::Conflicts => conflicts_cmd::run(&output, &table),

        Commands::Wrapper { namespace, dir } => {
            let out_dir = dir
                .or_else(|| config.wrapper_dir.clone())
                .or_else(|| roots.first().cloned())
                .context("no wrapper output directory: pass --dir or configure roots")?;
            wrapper_cmd::run(&output, &table, &namespace, &out_dir)
        }
    }
}
