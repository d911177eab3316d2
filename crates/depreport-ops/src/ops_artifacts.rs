//! Operation: write the flat per-configuration artifact report.

use std::path::{Path, PathBuf};

use depreport_core::config::ARTIFACT_REPORT_FILE;
use depreport_core::report::ConfigurationReport;
use depreport_graph::view::ResolutionView;

use crate::report;
use crate::selection::select_configurations;

/// Options for `depreport artifacts`.
#[derive(Debug, Default)]
pub struct ArtifactOptions {
    pub snapshot: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub configurations: Vec<String>,
}

/// What `artifacts` produced.
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub path: PathBuf,
    pub reports: Vec<ConfigurationReport>,
}

/// Collect one configuration's artifacts and unresolved dependencies.
///
/// Returns `None` for missing or non-resolvable configurations.
pub fn collect_report<V>(view: &V, configuration: &str) -> Option<ConfigurationReport>
where
    V: ResolutionView + ?Sized,
{
    if !view.is_resolvable(configuration) {
        tracing::debug!("skipping configuration '{configuration}': missing or not resolvable");
        return None;
    }
    let unresolved = view.unresolved_dependencies(configuration);
    for problem in &unresolved {
        tracing::warn!("could not resolve {problem} in '{configuration}'");
    }
    Some(ConfigurationReport {
        configuration: configuration.to_string(),
        artifacts: view.resolved_artifacts(configuration),
        unresolved,
    })
}

/// Build and write the artifact report for the selected configurations.
pub fn artifacts(project_root: &Path, opts: &ArtifactOptions) -> miette::Result<ArtifactOutcome> {
    let inputs = crate::load_inputs(project_root, opts.snapshot.as_deref())?;
    let patterns = if opts.configurations.is_empty() {
        &inputs.config.configurations
    } else {
        &opts.configurations
    };
    let configurations = select_configurations(&inputs.graph, patterns)?;

    let reports: Vec<ConfigurationReport> = configurations
        .iter()
        .filter_map(|name| collect_report(&inputs.graph, name))
        .collect();

    let dest = inputs
        .config
        .output_path(project_root, opts.output.as_deref(), ARTIFACT_REPORT_FILE);
    let document = report::render_artifact_document(&reports)?;
    let path = report::write_report(&dest, &document)?;

    Ok(ArtifactOutcome { path, reports })
}
