//! CLI argument definitions for depreport.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depreport",
    version,
    about = "Write conflict-annotated dependency reports from a resolved graph",
    long_about = "depreport reads the dependency graph exported by your build tool's resolver \
                  and writes a deterministic JSON report: one cycle-safe tree per configuration, \
                  with every edge flagged when conflict resolution picked a different version."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Arguments shared by every report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Resolution snapshot to read
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Where to write the report
    #[arg(short, long, env = "DEPREPORT_OUTPUT")]
    pub output: Option<PathBuf>,
    /// Configuration name or glob to report (repeatable)
    #[arg(short, long = "configuration")]
    pub configurations: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the dependency tree of each configuration
    Tree {
        #[command(flatten)]
        report: ReportArgs,
        /// Write one entry per configuration instead of a single list of trees
        #[arg(long)]
        grouped: bool,
        /// Write the report without indentation
        #[arg(long)]
        compact: bool,
        /// Configurations walked concurrently
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Write the resolved artifacts and unresolved dependencies of each configuration
    Artifacts {
        #[command(flatten)]
        report: ReportArgs,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
