use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use depreport_util::errors::ReportError;
use depreport_util::fs::resolve_against;

use crate::CONFIG_FILE;

/// Configurations reported when none are configured.
pub const DEFAULT_CONFIGURATIONS: &[&str] = &[
    "compileClasspath",
    "runtimeClasspath",
    "testCompileClasspath",
    "testRuntimeClasspath",
];

/// Directory under the build directory that holds depreport files.
pub const REPORT_DIR: &str = "dependency-resolution";
pub const SNAPSHOT_FILE: &str = "snapshot.json";
pub const TREE_REPORT_FILE: &str = "resolved-dependencies.json";
pub const ARTIFACT_REPORT_FILE: &str = "resolved-artifacts.json";

/// Project configuration loaded from `depreport.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub report: ReportConfig,
}

/// Settings from `[report]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Configuration names or glob patterns, in report order.
    #[serde(default = "default_configurations")]
    pub configurations: Vec<String>,
    #[serde(default)]
    pub snapshot: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default = "default_build_dir", rename = "build-dir")]
    pub build_dir: String,
    #[serde(default = "default_jobs")]
    pub jobs: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            configurations: default_configurations(),
            snapshot: None,
            output: None,
            build_dir: default_build_dir(),
            jobs: default_jobs(),
        }
    }
}

fn default_configurations() -> Vec<String> {
    DEFAULT_CONFIGURATIONS.iter().map(|s| s.to_string()).collect()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_jobs() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(4)
}

impl ProjectConfig {
    /// Load `depreport.toml` from `project_root`, or return defaults if it doesn't exist.
    pub fn load(project_root: &Path) -> miette::Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, project_root.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ReportError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            ReportError::Config {
                message: format!("Failed to parse {CONFIG_FILE}: {e}"),
            }
            .into()
        })
    }
}

impl ReportConfig {
    /// `<project>/<build-dir>/dependency-resolution`.
    pub fn report_dir(&self, project_root: &Path) -> PathBuf {
        resolve_against(project_root, Path::new(&interpolate(&self.build_dir))).join(REPORT_DIR)
    }

    /// Snapshot location: configured path, else the default under the build directory.
    pub fn snapshot_path(&self, project_root: &Path) -> PathBuf {
        match &self.snapshot {
            Some(p) => resolve_against(project_root, Path::new(&interpolate(p))),
            None => self.report_dir(project_root).join(SNAPSHOT_FILE),
        }
    }

    /// Report destination.
    ///
    /// Precedence: `explicit` (CLI flag or `DEPREPORT_OUTPUT`), then `output`
    /// from the config file, then `default_file` under the report directory.
    pub fn output_path(
        &self,
        project_root: &Path,
        explicit: Option<&Path>,
        default_file: &str,
    ) -> PathBuf {
        if let Some(p) = explicit {
            return resolve_against(project_root, p);
        }
        match &self.output {
            Some(p) => resolve_against(project_root, Path::new(&interpolate(p))),
            None => self.report_dir(project_root).join(default_file),
        }
    }
}

/// Interpolate `${env:VAR}` references from the process environment.
///
/// Unset variables expand to the empty string; an unterminated reference is
/// left as-is.
pub fn interpolate(input: &str) -> String {
    let mut result = input.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${env:") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let value = std::env::var(&result[start + 6..end]).unwrap_or_default();
        result.replace_range(start..=end, &value);
        from = start + value.len();
    }
    result
}
