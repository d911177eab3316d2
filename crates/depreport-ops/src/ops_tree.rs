//! Operation: walk the resolved graph and write the dependency tree report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use depreport_core::config::TREE_REPORT_FILE;
use depreport_core::report::{ConfigurationTree, UnresolvedDependency, VersionConflict};
use depreport_graph::graph::ResolvedGraph;
use depreport_graph::walker::{walk_configuration, walk_configurations, ConfigurationWalk};
use depreport_util::errors::ReportError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::report::{self, JsonStyle, TreeLayout};
use crate::selection::select_configurations;

/// Options for `depreport tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    /// Snapshot file to read instead of the configured one.
    pub snapshot: Option<PathBuf>,
    /// Destination instead of the configured or default one.
    pub output: Option<PathBuf>,
    /// Configuration names or patterns overriding `depreport.toml`.
    pub configurations: Vec<String>,
    pub layout: TreeLayout,
    pub style: JsonStyle,
    /// Maximum configurations walked concurrently.
    pub jobs: Option<usize>,
}

/// What `tree` produced.
#[derive(Debug)]
pub struct TreeOutcome {
    /// Absolute path of the written report.
    pub path: PathBuf,
    pub trees: Vec<ConfigurationTree>,
    /// Unresolved edges, tagged with the configuration they were met in.
    pub diagnostics: Vec<(String, UnresolvedDependency)>,
    /// Modules selected at a version other than the requested one.
    pub conflicts: Vec<VersionConflict>,
}

/// Walk the selected configurations and write the tree report.
pub async fn tree(project_root: &Path, opts: &TreeOptions) -> miette::Result<TreeOutcome> {
    let inputs = crate::load_inputs(project_root, opts.snapshot.as_deref())?;
    let patterns = if opts.configurations.is_empty() {
        &inputs.config.configurations
    } else {
        &opts.configurations
    };
    let configurations = select_configurations(&inputs.graph, patterns)?;
    let jobs = opts.jobs.unwrap_or(inputs.config.jobs as usize).max(1);
    let dest = inputs
        .config
        .output_path(project_root, opts.output.as_deref(), TREE_REPORT_FILE);

    let walks = walk_parallel(Arc::new(inputs.graph), configurations, jobs).await?;

    let mut trees = Vec::with_capacity(walks.len());
    let mut diagnostics = Vec::new();
    for walk in walks {
        let name = &walk.tree.configuration;
        diagnostics.extend(walk.diagnostics.into_iter().map(|d| (name.clone(), d)));
        trees.push(walk.tree);
    }

    let conflicts: Vec<VersionConflict> = trees.iter().flat_map(|t| t.conflicts()).collect();
    tracing::debug!("{} version conflicts across {} configurations", conflicts.len(), trees.len());

    let document = report::render_tree_document(&trees, opts.layout, opts.style)?;
    let path = report::write_report(&dest, &document)?;

    Ok(TreeOutcome {
        path,
        trees,
        diagnostics,
        conflicts,
    })
}

/// Walk configurations on up to `jobs` blocking tasks.
///
/// Every configuration gets its own walk (and visited set). Results come back
/// in the order of `configurations`, skipped ones removed.
pub async fn walk_parallel(
    graph: Arc<ResolvedGraph>,
    configurations: Vec<String>,
    jobs: usize,
) -> miette::Result<Vec<ConfigurationWalk>> {
    if jobs <= 1 || configurations.len() <= 1 {
        return Ok(walk_configurations(graph.as_ref(), &configurations));
    }

    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut join_set = JoinSet::new();
    let count = configurations.len();
    for (position, name) in configurations.into_iter().enumerate() {
        let graph = graph.clone();
        let sem = semaphore.clone();
        join_set.spawn(async move {
            let _permit = sem.acquire_owned().await;
            let walk =
                tokio::task::spawn_blocking(move || walk_configuration(graph.as_ref(), &name))
                    .await;
            (position, walk)
        });
    }

    let mut slots: Vec<Option<ConfigurationWalk>> = vec![None; count];
    while let Some(joined) = join_set.join_next().await {
        let (position, walk) = joined.map_err(|e| ReportError::Generic {
            message: format!("configuration walk task failed: {e}"),
        })?;
        slots[position] = walk.map_err(|e| ReportError::Generic {
            message: format!("configuration walk panicked: {e}"),
        })?;
    }

    Ok(slots.into_iter().flatten().collect())
}
