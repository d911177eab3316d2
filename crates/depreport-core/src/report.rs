//! Report model: the entities serialized into the output documents.
//!
//! Field declaration order is the JSON key order, so it must not be
//! rearranged casually.

use serde::Serialize;

use crate::coordinate::ModuleKey;

/// One resolved module in a dependency tree.
///
/// `conflict` is derived from `requested_version` and `version` when the
/// value is built and cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyInfo {
    group: String,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_version: Option<String>,
    conflict: bool,
    children: Vec<DependencyInfo>,
}

impl DependencyInfo {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        requested_version: Option<String>,
        children: Vec<DependencyInfo>,
    ) -> Self {
        let version = version.into();
        let conflict = requested_version
            .as_deref()
            .is_some_and(|requested| requested != version);
        Self {
            group: group.into(),
            name: name.into(),
            version,
            requested_version,
            conflict,
            children,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version the resolver selected.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The version declared on the edge that reached this module, if any.
    pub fn requested_version(&self) -> Option<&str> {
        self.requested_version.as_deref()
    }

    pub fn conflict(&self) -> bool {
        self.conflict
    }

    pub fn children(&self) -> &[DependencyInfo] {
        &self.children
    }

    pub fn key(&self) -> ModuleKey {
        ModuleKey::new(&self.group, &self.name)
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyInfo> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

// Deep chains would otherwise drop one nesting level per stack frame.
impl Drop for DependencyInfo {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut info) = pending.pop() {
            pending.append(&mut info.children);
        }
    }
}

/// A module the resolver selected at a version other than the one requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConflict {
    pub configuration: String,
    pub module: ModuleKey,
    pub requested: String,
    pub selected: String,
}

impl std::fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.module, self.requested, self.selected)
    }
}

/// A configuration's dependency forest, as written by the grouped tree layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationTree {
    pub configuration: String,
    pub dependencies: Vec<DependencyInfo>,
}

impl ConfigurationTree {
    /// Number of modules across every tree, roots included.
    pub fn module_count(&self) -> usize {
        self.dependencies.iter().map(|root| root.iter().count()).sum()
    }

    /// Number of modules whose selected version differs from the request.
    pub fn conflict_count(&self) -> usize {
        self.dependencies
            .iter()
            .flat_map(|root| root.iter())
            .filter(|info| info.conflict())
            .count()
    }

    /// Every conflicted module, in depth-first order.
    pub fn conflicts(&self) -> Vec<VersionConflict> {
        self.dependencies
            .iter()
            .flat_map(|root| root.iter())
            .filter_map(|info| {
                let requested = info.requested_version().filter(|_| info.conflict())?;
                Some(VersionConflict {
                    configuration: self.configuration.clone(),
                    module: info.key(),
                    requested: requested.to_string(),
                    selected: info.version().to_string(),
                })
            })
            .collect()
    }
}

/// A resolved artifact file belonging to a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedArtifact {
    pub group: String,
    pub name: String,
    pub version: String,
    pub file_path: String,
}

/// A dependency the resolver could not satisfy, with its problem description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnresolvedDependency {
    pub group: String,
    pub name: String,
    pub reason: String,
}

impl std::fmt::Display for UnresolvedDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} ({})", self.group, self.name, self.reason)
    }
}

/// Flat per-configuration listing of artifacts and resolution problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationReport {
    pub configuration: String,
    pub artifacts: Vec<ResolvedArtifact>,
    pub unresolved: Vec<UnresolvedDependency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, version: &str, requested: Option<&str>) -> DependencyInfo {
        DependencyInfo::new(
            "com.example",
            name,
            version,
            requested.map(str::to_string),
            Vec::new(),
        )
    }

    #[test]
    fn conflict_when_requested_differs() {
        assert!(leaf("bar", "0.2.0", Some("0.1.0")).conflict());
    }

    #[test]
    fn no_conflict_when_requested_matches() {
        assert!(!leaf("foo", "0.0.1", Some("0.0.1")).conflict());
    }

    #[test]
    fn no_conflict_without_request() {
        let info = leaf("foo", "0.0.1", None);
        assert!(!info.conflict());
        assert!(info.requested_version().is_none());
    }

    #[test]
    fn json_key_order_is_stable() {
        let info = DependencyInfo::new(
            "com.example",
            "foo",
            "0.0.1",
            Some("0.0.1".to_string()),
            vec![leaf("bar", "0.2.0", Some("0.1.0"))],
        );
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(
            json,
            r#"{"group":"com.example","name":"foo","version":"0.0.1","requestedVersion":"0.0.1","conflict":false,"children":[{"group":"com.example","name":"bar","version":"0.2.0","requestedVersion":"0.1.0","conflict":true,"children":[]}]}"#
        );
    }

    #[test]
    fn absent_request_is_omitted() {
        let json = serde_json::to_string(&leaf("foo", "1.0", None)).unwrap();
        assert!(!json.contains("requestedVersion"), "got: {json}");
    }

    #[test]
    fn iter_is_preorder() {
        let tree = DependencyInfo::new(
            "g",
            "a",
            "1",
            None,
            vec![
                DependencyInfo::new("g", "b", "1", None, vec![leaf("d", "1", None)]),
                leaf("c", "1", None),
            ],
        );
        let names: Vec<&str> = tree.iter().map(|i| i.name()).collect();
        assert_eq!(names, ["a", "b", "d", "c"]);
    }

    #[test]
    fn configuration_tree_counts() {
        let tree = ConfigurationTree {
            configuration: "compileClasspath".to_string(),
            dependencies: vec![DependencyInfo::new(
                "com.example",
                "foo",
                "0.0.1",
                Some("0.0.1".to_string()),
                vec![leaf("bar", "0.2.0", Some("0.1.0"))],
            )],
        };
        assert_eq!(tree.module_count(), 2);
        assert_eq!(tree.conflict_count(), 1);
    }

    #[test]
    fn conflicts_name_module_and_versions() {
        let tree = ConfigurationTree {
            configuration: "runtimeClasspath".to_string(),
            dependencies: vec![
                DependencyInfo::new(
                    "com.example",
                    "foo",
                    "0.0.1",
                    Some("0.0.1".to_string()),
                    vec![leaf("bar", "0.2.0", Some("0.1.0"))],
                ),
                leaf("baz", "3.1", Some("3.0")),
                leaf("qux", "1.0", None),
            ],
        };
        let conflicts = tree.conflicts();
        assert_eq!(conflicts.len(), 2);
        assert_eq!(
            conflicts[0],
            VersionConflict {
                configuration: "runtimeClasspath".to_string(),
                module: ModuleKey::new("com.example", "bar"),
                requested: "0.1.0".to_string(),
                selected: "0.2.0".to_string(),
            }
        );
        assert_eq!(conflicts[1].to_string(), "com.example:baz 3.0 -> 3.1");
    }

    #[test]
    fn dropping_a_deep_chain_is_iterative() {
        let mut node = leaf("m0", "1", None);
        for i in 1..100_000 {
            node = DependencyInfo::new("g", format!("m{i}"), "1", None, vec![node]);
        }
        assert_eq!(node.iter().count(), 100_000);
        drop(node);
    }

    #[test]
    fn artifact_uses_file_path_key() {
        let artifact = ResolvedArtifact {
            group: "g".into(),
            name: "n".into(),
            version: "1".into(),
            file_path: "/cache/n-1.jar".into(),
        };
        let json = serde_json::to_string(&artifact).unwrap();
        assert_eq!(
            json,
            r#"{"group":"g","name":"n","version":"1","filePath":"/cache/n-1.jar"}"#
        );
    }
}
