//! Handler for `depreport tree`.

use miette::Result;

use depreport_ops::ops_tree::{self, TreeOptions};
use depreport_ops::report::{JsonStyle, TreeLayout};
use depreport_util::progress;

use crate::cli::ReportArgs;

pub async fn exec(
    report: ReportArgs,
    layout: TreeLayout,
    style: JsonStyle,
    jobs: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let project_root = super::project_root()?;

    let opts = TreeOptions {
        snapshot: report.snapshot,
        output: report.output,
        configurations: report.configurations,
        layout,
        style,
        jobs,
    };
    tracing::debug!("tree options: {opts:?}");

    let outcome = ops_tree::tree(&project_root, &opts).await?;

    if verbose {
        for tree in &outcome.trees {
            progress::status_info(
                "Walked",
                &format!(
                    "{} ({} modules, {} conflicts)",
                    tree.configuration,
                    tree.module_count(),
                    tree.conflict_count()
                ),
            );
        }
        for conflict in &outcome.conflicts {
            progress::status_warn("Conflict", &format!("{conflict} in {}", conflict.configuration));
        }
        for (configuration, problem) in &outcome.diagnostics {
            progress::status_warn("Unresolved", &format!("{problem} in {configuration}"));
        }
        progress::status("Finished", &format!("{} configurations", outcome.trees.len()));
    }

    println!("Wrote dependency tree report to {}", outcome.path.display());
    Ok(())
}
