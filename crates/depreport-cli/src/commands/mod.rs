//! Command dispatch and handler modules.

mod artifacts;
mod tree;

use std::path::PathBuf;

use miette::Result;

use depreport_core::CONFIG_FILE;
use depreport_ops::report::{JsonStyle, TreeLayout};
use depreport_util::errors::ReportError;
use depreport_util::fs::find_ancestor_with;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tree {
            report,
            grouped,
            compact,
            jobs,
        } => {
            let layout = if grouped {
                TreeLayout::Grouped
            } else {
                TreeLayout::Merged
            };
            let style = if compact {
                JsonStyle::Compact
            } else {
                JsonStyle::Pretty
            };
            tree::exec(report, layout, style, jobs, cli.verbose).await
        }
        Command::Artifacts { report } => artifacts::exec(report, cli.verbose),
    }
}

/// Nearest ancestor holding `depreport.toml`, else the working directory.
fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(ReportError::Io)?;
    let root = find_ancestor_with(&cwd, CONFIG_FILE).unwrap_or(cwd);
    tracing::debug!("project root: {}", root.display());
    Ok(root)
}
