use serde::{Deserialize, Serialize};
use std::path::Path;

use depreport_util::errors::ReportError;

/// Problem description used when an unresolved edge carries none.
pub const DEFAULT_UNRESOLVED_REASON: &str = "could not be resolved";

/// Resolved dependency graph exported by the build tool's resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionSnapshot {
    #[serde(default)]
    pub configurations: Vec<SnapshotConfiguration>,
    #[serde(default)]
    pub components: Vec<SnapshotComponent>,
}

/// A named dependency scope and its first-level edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfiguration {
    pub name: String,
    #[serde(default = "default_resolvable")]
    pub resolvable: bool,
    #[serde(default)]
    pub dependencies: Vec<SnapshotEdge>,
    #[serde(default)]
    pub artifacts: Vec<SnapshotArtifact>,
}

fn default_resolvable() -> bool {
    true
}

/// A selected module version and its outgoing edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotComponent {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<SnapshotEdge>,
}

/// A "depends on" edge.
///
/// `selected` names the version the resolver picked; when it is absent the
/// edge is unresolved and `reason` describes the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub requested: Option<String>,
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl SnapshotEdge {
    pub fn reason_or_default(&self) -> &str {
        self.reason.as_deref().unwrap_or(DEFAULT_UNRESOLVED_REASON)
    }
}

/// A resolved artifact file for a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotArtifact {
    pub group: String,
    pub name: String,
    pub version: String,
    pub file: String,
}

impl ResolutionSnapshot {
    /// Load and parse a snapshot file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::Snapshot {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&content).map_err(|e| {
            ReportError::Snapshot {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
