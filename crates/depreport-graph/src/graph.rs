//! Resolved dependency graph backed by petgraph.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use depreport_core::coordinate::component_id;
use depreport_core::report::{ResolvedArtifact, UnresolvedDependency};
use depreport_core::snapshot::{ResolutionSnapshot, SnapshotEdge};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::view::{
    ConfigurationInfo, DependencyEdge, EdgeTarget, NodeId, ResolutionView, ResolvedNode,
};

/// Node weight. Configurations are synthetic roots; every unresolved edge
/// points at its own `Unresolved` node.
#[derive(Debug, Clone)]
enum GraphNode {
    Configuration(ConfigurationInfo),
    Module(ResolvedNode),
    Unresolved(UnresolvedDependency),
}

/// Edge label in the dependency graph.
#[derive(Debug, Clone)]
struct DepEdge {
    requested: Option<String>,
    /// Position in the parent's declared edge list.
    ordinal: usize,
}

/// A resolved dependency graph.
pub struct ResolvedGraph {
    graph: DiGraph<GraphNode, DepEdge>,
    /// Lookup from `group:name:version` to module node.
    index: HashMap<String, NodeIndex>,
    /// Configuration roots in snapshot order.
    configurations: Vec<NodeIndex>,
    artifacts: HashMap<String, Vec<ResolvedArtifact>>,
}

impl ResolvedGraph {
    /// Load a snapshot file and build its graph.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let snapshot = ResolutionSnapshot::from_path(path)?;
        Ok(Self::from_snapshot(&snapshot))
    }

    /// Build the graph from a parsed snapshot.
    ///
    /// Anomalies never fail the build: duplicate components keep their first
    /// definition, and edges selecting a component that is not in the snapshot
    /// become unresolved edges.
    pub fn from_snapshot(snapshot: &ResolutionSnapshot) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            configurations: Vec::new(),
            artifacts: HashMap::new(),
        };

        let mut pending: Vec<(NodeIndex, &[SnapshotEdge])> = Vec::new();

        for component in &snapshot.components {
            let id = component_id(&component.group, &component.name, &component.version);
            if graph.index.contains_key(&id) {
                tracing::warn!(
                    "duplicate component {id} in snapshot, keeping the first definition"
                );
                continue;
            }
            let idx = graph.graph.add_node(GraphNode::Module(ResolvedNode {
                group: component.group.clone(),
                name: component.name.clone(),
                version: component.version.clone(),
            }));
            graph.index.insert(id, idx);
            pending.push((idx, component.dependencies.as_slice()));
        }

        for configuration in &snapshot.configurations {
            let idx = graph.graph.add_node(GraphNode::Configuration(ConfigurationInfo {
                name: configuration.name.clone(),
                resolvable: configuration.resolvable,
            }));
            graph.configurations.push(idx);
            pending.push((idx, configuration.dependencies.as_slice()));

            let artifacts = configuration
                .artifacts
                .iter()
                .map(|a| ResolvedArtifact {
                    group: a.group.clone(),
                    name: a.name.clone(),
                    version: a.version.clone(),
                    file_path: a.file.clone(),
                })
                .collect();
            graph.artifacts.insert(configuration.name.clone(), artifacts);
        }

        for (from, edges) in pending {
            for (ordinal, edge) in edges.iter().enumerate() {
                graph.add_snapshot_edge(from, ordinal, edge);
            }
        }
        tracing::debug!(
            "built graph: {} modules, {} configurations, {} edges",
            graph.index.len(),
            graph.configurations.len(),
            graph.graph.edge_count()
        );

        graph
    }

    fn add_snapshot_edge(&mut self, from: NodeIndex, ordinal: usize, edge: &SnapshotEdge) {
        let target = match &edge.selected {
            Some(version) => {
                let id = component_id(&edge.group, &edge.name, version);
                match self.index.get(&id) {
                    Some(&idx) => Ok(idx),
                    None => {
                        tracing::warn!("edge selects {id}, which is not in the snapshot");
                        Err(format!("selected component {id} is missing from the snapshot"))
                    }
                }
            }
            None => Err(edge.reason_or_default().to_string()),
        };

        let to = target.unwrap_or_else(|reason| {
            self.graph.add_node(GraphNode::Unresolved(UnresolvedDependency {
                group: edge.group.clone(),
                name: edge.name.clone(),
                reason,
            }))
        });

        self.graph.add_edge(
            from,
            to,
            DepEdge {
                requested: edge.requested.clone(),
                ordinal,
            },
        );
    }

    fn configuration(&self, name: &str) -> Option<(NodeIndex, &ConfigurationInfo)> {
        self.configurations.iter().find_map(|&idx| match &self.graph[idx] {
            GraphNode::Configuration(info) if info.name == name => Some((idx, info)),
            _ => None,
        })
    }

    /// Outgoing edges of any node, in declared order.
    fn edges_of(&self, idx: NodeIndex) -> Vec<DependencyEdge> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .collect();
        // petgraph iterates newest-first.
        edges.sort_by_key(|e| e.weight().ordinal);

        edges
            .into_iter()
            .filter_map(|e| {
                let (group, name, target) = match &self.graph[e.target()] {
                    GraphNode::Module(node) => (
                        node.group.clone(),
                        node.name.clone(),
                        EdgeTarget::Resolved {
                            id: e.target(),
                            node: node.clone(),
                        },
                    ),
                    GraphNode::Unresolved(problem) => (
                        problem.group.clone(),
                        problem.name.clone(),
                        EdgeTarget::Unresolved {
                            reason: problem.reason.clone(),
                        },
                    ),
                    GraphNode::Configuration(_) => return None,
                };
                Some(DependencyEdge {
                    group,
                    name,
                    requested: e.weight().requested.clone(),
                    target,
                })
            })
            .collect()
    }
}

impl ResolutionView for ResolvedGraph {
    fn configurations(&self) -> Vec<ConfigurationInfo> {
        self.configurations
            .iter()
            .filter_map(|&idx| match &self.graph[idx] {
                GraphNode::Configuration(info) => Some(info.clone()),
                _ => None,
            })
            .collect()
    }

    fn root_edges(&self, configuration: &str) -> Option<Vec<DependencyEdge>> {
        let (idx, info) = self.configuration(configuration)?;
        if !info.resolvable {
            return None;
        }
        Some(self.edges_of(idx))
    }

    fn outgoing(&self, node: NodeId) -> Vec<DependencyEdge> {
        match self.graph.node_weight(node) {
            Some(GraphNode::Module(_)) => self.edges_of(node),
            _ => Vec::new(),
        }
    }

    fn resolved_artifacts(&self, configuration: &str) -> Vec<ResolvedArtifact> {
        if !self.is_resolvable(configuration) {
            return Vec::new();
        }
        self.artifacts.get(configuration).cloned().unwrap_or_default()
    }

    fn unresolved_dependencies(&self, configuration: &str) -> Vec<UnresolvedDependency> {
        let Some(roots) = self.root_edges(configuration) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut seen_problems = HashSet::new();
        let mut seen_nodes = HashSet::new();
        // Reverse so the stack pops edges in declared order.
        let mut stack: Vec<DependencyEdge> = roots.into_iter().rev().collect();

        while let Some(edge) = stack.pop() {
            match edge.target {
                EdgeTarget::Unresolved { reason } => {
                    let problem = UnresolvedDependency {
                        group: edge.group,
                        name: edge.name,
                        reason,
                    };
                    if seen_problems.insert(problem.clone()) {
                        found.push(problem);
                    }
                }
                EdgeTarget::Resolved { id, .. } => {
                    if seen_nodes.insert(id) {
                        stack.extend(self.edges_of(id).into_iter().rev());
                    }
                }
            }
        }

        found
    }
}
