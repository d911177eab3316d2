//! Expansion of configured configuration names and glob patterns.

use std::collections::HashSet;

use depreport_graph::view::ResolutionView;
use depreport_util::errors::ReportError;
use globset::Glob;

fn is_glob(pattern: &str) -> bool {
    pattern
        .chars()
        .any(|c| matches!(c, '*' | '?' | '[' | '{'))
}

/// Turn configured names and patterns into the ordered list of
/// configurations to report.
///
/// Literal names are kept where they appear even when the resolver does not
/// know them; the walker skips those. A pattern expands to every matching
/// configuration in the resolver's order. The first occurrence of a name wins.
pub fn select_configurations<V>(view: &V, patterns: &[String]) -> miette::Result<Vec<String>>
where
    V: ResolutionView + ?Sized,
{
    let available = view.configurations();
    let mut selected = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            if seen.insert(pattern.clone()) {
                selected.push(pattern.clone());
            }
            continue;
        }

        let matcher = Glob::new(pattern)
            .map_err(|e| ReportError::Config {
                message: format!("invalid configuration pattern '{pattern}': {e}"),
            })?
            .compile_matcher();
        let before = selected.len();
        for configuration in &available {
            if matcher.is_match(&configuration.name) && seen.insert(configuration.name.clone()) {
                selected.push(configuration.name.clone());
            }
        }
        if selected.len() == before {
            tracing::debug!("pattern '{pattern}' matched no new configurations");
        }
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depreport_core::snapshot::{ResolutionSnapshot, SnapshotConfiguration};
    use depreport_graph::graph::ResolvedGraph;

    fn graph(names: &[&str]) -> ResolvedGraph {
        ResolvedGraph::from_snapshot(&ResolutionSnapshot {
            configurations: names
                .iter()
                .map(|n| SnapshotConfiguration {
                    name: n.to_string(),
                    resolvable: true,
                    dependencies: Vec::new(),
                    artifacts: Vec::new(),
                })
                .collect(),
            components: Vec::new(),
        })
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn literals_keep_requested_order() {
        let g = graph(&["compileClasspath", "runtimeClasspath"]);
        let selected =
            select_configurations(&g, &strings(&["runtimeClasspath", "compileClasspath"])).unwrap();
        assert_eq!(selected, ["runtimeClasspath", "compileClasspath"]);
    }

    #[test]
    fn unknown_literals_are_kept() {
        let g = graph(&["compileClasspath"]);
        let selected = select_configurations(&g, &strings(&["kapt"])).unwrap();
        assert_eq!(selected, ["kapt"]);
    }

    #[test]
    fn globs_expand_in_resolver_order() {
        let g = graph(&[
            "testRuntimeClasspath",
            "compileClasspath",
            "testCompileClasspath",
        ]);
        let selected = select_configurations(&g, &strings(&["test*"])).unwrap();
        assert_eq!(selected, ["testRuntimeClasspath", "testCompileClasspath"]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let g = graph(&["compileClasspath", "runtimeClasspath"]);
        let selected = select_configurations(
            &g,
            &strings(&["runtimeClasspath", "*Classpath", "compileClasspath"]),
        )
        .unwrap();
        assert_eq!(selected, ["runtimeClasspath", "compileClasspath"]);
    }

    #[test]
    fn invalid_glob_is_config_error() {
        let g = graph(&["compileClasspath"]);
        let err = select_configurations(&g, &strings(&["[unclosed"])).unwrap_err();
        assert!(
            err.to_string().contains("invalid configuration pattern"),
            "got: {err}"
        );
    }
}
