pub mod ops_artifacts;
pub mod ops_tree;
pub mod report;
pub mod selection;

use std::path::{Path, PathBuf};

use depreport_core::config::{ProjectConfig, ReportConfig};
use depreport_graph::graph::ResolvedGraph;
use depreport_util::fs::resolve_against;

/// Project configuration plus the graph loaded from its snapshot.
pub struct ReportInputs {
    pub config: ReportConfig,
    pub snapshot_path: PathBuf,
    pub graph: ResolvedGraph,
}

/// Load `depreport.toml` and the resolution snapshot for `project_root`.
///
/// `snapshot` overrides the configured snapshot location.
pub fn load_inputs(project_root: &Path, snapshot: Option<&Path>) -> miette::Result<ReportInputs> {
    let config = ProjectConfig::load(project_root)?.report;
    let snapshot_path = match snapshot {
        Some(p) => resolve_against(project_root, p),
        None => config.snapshot_path(project_root),
    };
    tracing::debug!("loading snapshot {}", snapshot_path.display());
    let graph = ResolvedGraph::load(&snapshot_path)?;
    Ok(ReportInputs {
        config,
        snapshot_path,
        graph,
    })
}
