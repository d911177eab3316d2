use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn depreport_cmd() -> Command {
    let mut cmd = Command::cargo_bin("depreport").unwrap();
    cmd.env_remove("DEPREPORT_OUTPUT");
    cmd
}

const SNAPSHOT: &str = r#"{
  "configurations": [
    {
      "name": "runtimeClasspath",
      "dependencies": [
        {"group": "com.example", "name": "foo", "requested": "1.0", "selected": "1.0"},
        {"group": "com.example", "name": "lost", "requested": "1.0", "reason": "not found"}
      ],
      "artifacts": [
        {"group": "com.example", "name": "foo", "version": "1.0", "file": "/cache/foo-1.0.jar"}
      ]
    },
    {"name": "implementation", "resolvable": false}
  ],
  "components": [
    {"group": "com.example", "name": "foo", "version": "1.0"}
  ]
}"#;

#[test]
fn test_artifacts_report() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("graph.json"), SNAPSHOT).unwrap();

    depreport_cmd()
        .current_dir(tmp.path())
        .args([
            "artifacts",
            "--snapshot",
            "graph.json",
            "-c",
            "runtimeClasspath",
            "-c",
            "implementation",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote artifact report to"))
        .stdout(predicate::str::contains("resolved-artifacts.json"));

    let path = tmp
        .path()
        .join("build/dependency-resolution/resolved-artifacts.json");
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(
        doc,
        serde_json::json!([{
            "configuration": "runtimeClasspath",
            "artifacts": [{
                "group": "com.example",
                "name": "foo",
                "version": "1.0",
                "filePath": "/cache/foo-1.0.jar"
            }],
            "unresolved": [{
                "group": "com.example",
                "name": "lost",
                "reason": "not found"
            }]
        }])
    );
}

#[test]
fn test_artifacts_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("depreport.toml"), "[report\n").unwrap();

    depreport_cmd()
        .current_dir(tmp.path())
        .args(["artifacts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
