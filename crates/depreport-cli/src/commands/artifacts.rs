//! Handler for `depreport artifacts`.

use miette::Result;

use depreport_ops::ops_artifacts::{self, ArtifactOptions};
use depreport_util::progress;

use crate::cli::ReportArgs;

pub fn exec(report: ReportArgs, verbose: bool) -> Result<()> {
    let project_root = super::project_root()?;

    let opts = ArtifactOptions {
        snapshot: report.snapshot,
        output: report.output,
        configurations: report.configurations,
    };
    tracing::debug!("artifact options: {opts:?}");

    let outcome = ops_artifacts::artifacts(&project_root, &opts)?;

    if verbose {
        for report in &outcome.reports {
            progress::status_info(
                "Listed",
                &format!(
                    "{} ({} artifacts)",
                    report.configuration,
                    report.artifacts.len()
                ),
            );
            for problem in &report.unresolved {
                progress::status_warn(
                    "Unresolved",
                    &format!("{problem} in {}", report.configuration),
                );
            }
        }
        progress::status("Finished", &format!("{} configurations", outcome.reports.len()));
    }

    println!("Wrote artifact report to {}", outcome.path.display());
    Ok(())
}
