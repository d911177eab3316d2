//! Read-only interface to a resolver's output.

use std::fmt;

use depreport_core::coordinate::ModuleKey;
use depreport_core::report::{ResolvedArtifact, UnresolvedDependency};
use petgraph::graph::NodeIndex;

/// Handle to a resolved node inside a [`ResolutionView`].
pub type NodeId = NodeIndex;

/// A module at the version the resolver selected.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResolvedNode {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ResolvedNode {
    /// `group:name` identity (without version).
    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.group, &self.name)
    }
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// A configuration as listed by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationInfo {
    pub name: String,
    pub resolvable: bool,
}

/// Outcome of resolving a single edge.
#[derive(Debug, Clone)]
pub enum EdgeTarget {
    Resolved { id: NodeId, node: ResolvedNode },
    Unresolved { reason: String },
}

/// A "depends on" edge: what was requested and what it resolved to.
#[derive(Debug, Clone)]
pub struct DependencyEdge {
    pub group: String,
    pub name: String,
    /// Version declared on the edge before conflict resolution.
    pub requested: Option<String>,
    pub target: EdgeTarget,
}

/// Everything the walker and the artifact report need from a resolver.
///
/// Edge sequences are returned in the resolver's order, which must be stable
/// for a given graph.
pub trait ResolutionView {
    /// Every configuration known to the resolver, in declaration order.
    fn configurations(&self) -> Vec<ConfigurationInfo>;

    /// First-level edges of `configuration`, or `None` if it does not exist or
    /// cannot be resolved.
    fn root_edges(&self, configuration: &str) -> Option<Vec<DependencyEdge>>;

    /// Outgoing edges of a resolved node.
    fn outgoing(&self, node: NodeId) -> Vec<DependencyEdge>;

    /// Artifact files resolved for `configuration`.
    fn resolved_artifacts(&self, configuration: &str) -> Vec<ResolvedArtifact>;

    /// Distinct unresolved edges reachable from `configuration`.
    fn unresolved_dependencies(&self, configuration: &str) -> Vec<UnresolvedDependency>;

    fn is_resolvable(&self, configuration: &str) -> bool {
        self.configurations()
            .iter()
            .any(|c| c.name == configuration && c.resolvable)
    }
}
