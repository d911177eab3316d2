//! Depth-first walk of a resolved graph into conflict-annotated trees.
//!
//! Each configuration is walked with its own [`VisitedSet`]. A module is
//! expanded the first time it is reached and pruned on every later
//! encounter within the same configuration, which breaks cycles and keeps
//! diamonds from duplicating subtrees. Unresolved edges produce no node;
//! they are collected as diagnostics on the returned [`ConfigurationWalk`].

use std::collections::HashSet;

use depreport_core::coordinate::ModuleKey;
use depreport_core::report::{ConfigurationTree, DependencyInfo, UnresolvedDependency};

use crate::view::{DependencyEdge, EdgeTarget, ResolutionView, ResolvedNode};

/// Modules already expanded during one configuration's walk.
#[derive(Debug, Default)]
pub struct VisitedSet {
    modules: HashSet<ModuleKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` visited. Returns `false` if it already was.
    pub fn insert(&mut self, key: ModuleKey) -> bool {
        self.modules.insert(key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }
}

/// Result of walking one configuration.
#[derive(Debug, Clone)]
pub struct ConfigurationWalk {
    pub tree: ConfigurationTree,
    /// Unresolved edges met during the walk, in encounter order.
    pub diagnostics: Vec<UnresolvedDependency>,
}

/// A module being expanded: its remaining edges and the children built so far.
struct Frame {
    node: ResolvedNode,
    requested: Option<String>,
    edges: std::vec::IntoIter<DependencyEdge>,
    children: Vec<DependencyInfo>,
}

impl Frame {
    fn finish(self) -> DependencyInfo {
        DependencyInfo::new(
            self.node.group,
            self.node.name,
            self.node.version,
            self.requested,
            self.children,
        )
    }
}

/// Per-call traversal state.
struct WalkContext<'v, V: ?Sized> {
    view: &'v V,
    visited: VisitedSet,
    diagnostics: Vec<UnresolvedDependency>,
}

impl<'v, V: ResolutionView + ?Sized> WalkContext<'v, V> {
    fn new(view: &'v V) -> Self {
        Self {
            view,
            visited: VisitedSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Expand `roots` depth-first on an explicit frame stack.
    fn visit_all(&mut self, roots: Vec<DependencyEdge>) -> Vec<DependencyInfo> {
        let mut roots = roots.into_iter();
        let mut stack: Vec<Frame> = Vec::new();
        let mut finished = Vec::new();

        loop {
            let next = match stack.last_mut() {
                Some(frame) => frame.edges.next(),
                None => roots.next(),
            };
            match next {
                Some(edge) => {
                    if let Some(frame) = self.enter(edge) {
                        stack.push(frame);
                    }
                }
                None => {
                    let Some(frame) = stack.pop() else {
                        break;
                    };
                    let info = frame.finish();
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(info),
                        None => finished.push(info),
                    }
                }
            }
        }

        finished
    }

    /// Start expanding the target of `edge`, or record why it yields no node.
    fn enter(&mut self, edge: DependencyEdge) -> Option<Frame> {
        match edge.target {
            EdgeTarget::Unresolved { reason } => {
                tracing::warn!("could not resolve {}:{}: {reason}", edge.group, edge.name);
                self.diagnostics.push(UnresolvedDependency {
                    group: edge.group,
                    name: edge.name,
                    reason,
                });
                None
            }
            EdgeTarget::Resolved { id, node } => {
                if !self.visited.insert(node.key()) {
                    tracing::debug!("{} already expanded, pruning", node.key());
                    return None;
                }
                Some(Frame {
                    edges: self.view.outgoing(id).into_iter(),
                    node,
                    requested: edge.requested,
                    children: Vec::new(),
                })
            }
        }
    }
}

/// Walk one configuration.
///
/// Returns `None` when the configuration is missing or not resolvable; this
/// is a skip, not an error.
pub fn walk_configuration<V>(view: &V, configuration: &str) -> Option<ConfigurationWalk>
where
    V: ResolutionView + ?Sized,
{
    let Some(roots) = view.root_edges(configuration) else {
        tracing::debug!("skipping configuration '{configuration}': missing or not resolvable");
        return None;
    };

    let mut ctx = WalkContext::new(view);
    let dependencies = ctx.visit_all(roots);
    tracing::debug!(
        "walked '{configuration}': {} modules, {} unresolved",
        ctx.visited.len(),
        ctx.diagnostics.len()
    );

    Some(ConfigurationWalk {
        tree: ConfigurationTree {
            configuration: configuration.to_string(),
            dependencies,
        },
        diagnostics: ctx.diagnostics,
    })
}

/// Walk each configuration in order, skipping the ones that cannot be walked.
pub fn walk_configurations<V>(view: &V, configurations: &[String]) -> Vec<ConfigurationWalk>
where
    V: ResolutionView + ?Sized,
{
    configurations
        .iter()
        .filter_map(|name| walk_configuration(view, name))
        .collect()
}
