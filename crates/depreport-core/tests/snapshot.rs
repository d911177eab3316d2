use depreport_core::snapshot::{ResolutionSnapshot, DEFAULT_UNRESOLVED_REASON};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "configurations": [
    {
      "name": "compileClasspath",
      "dependencies": [
        {"group": "com.example", "name": "foo", "requested": "0.0.1", "selected": "0.0.1"},
        {"group": "com.example", "name": "missing", "requested": "9.9"}
      ],
      "artifacts": [
        {"group": "com.example", "name": "foo", "version": "0.0.1", "file": "/cache/foo-0.0.1.jar"}
      ]
    },
    {"name": "annotationProcessor", "resolvable": false}
  ],
  "components": [
    {"group": "com.example", "name": "foo", "version": "0.0.1", "dependencies": []}
  ]
}"#;

#[test]
fn parses_configurations_and_components() {
    let snapshot = ResolutionSnapshot::from_json(SNAPSHOT).unwrap();
    assert_eq!(snapshot.configurations.len(), 2);
    assert_eq!(snapshot.components.len(), 1);

    let compile = &snapshot.configurations[0];
    assert!(compile.resolvable, "resolvable defaults to true");
    assert_eq!(compile.dependencies.len(), 2);
    assert_eq!(compile.artifacts[0].file, "/cache/foo-0.0.1.jar");
    assert!(!snapshot.configurations[1].resolvable);
}

#[test]
fn unresolved_edge_gets_default_reason() {
    let snapshot = ResolutionSnapshot::from_json(SNAPSHOT).unwrap();
    let edge = &snapshot.configurations[0].dependencies[1];
    assert!(edge.selected.is_none());
    assert_eq!(edge.reason_or_default(), DEFAULT_UNRESOLVED_REASON);
}

#[test]
fn from_path_reports_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = ResolutionSnapshot::from_path(&tmp.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("Snapshot error"), "got: {err}");
}

#[test]
fn from_path_reports_malformed_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = ResolutionSnapshot::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"), "got: {err}");
}
