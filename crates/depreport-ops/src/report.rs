//! Rendering and writing of report documents.
//!
//! Documents are assembled completely in memory before anything touches
//! the destination, then written atomically.

use std::path::{Path, PathBuf};

use depreport_core::report::{ConfigurationReport, ConfigurationTree, DependencyInfo};
use depreport_util::errors::ReportError;
use depreport_util::fs::write_atomic;
use serde::Serialize;

/// Shape of the tree document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeLayout {
    /// A single list of trees, every configuration's roots in order.
    #[default]
    Merged,
    /// One `{configuration, dependencies}` object per configuration.
    Grouped,
}

/// Whitespace of a rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Two-space indentation.
    #[default]
    Pretty,
    /// No whitespace. Indentation grows with nesting depth, so very deep
    /// trees are far smaller this way.
    Compact,
}

/// Stack for the tree renderer, which nests one level per module on the
/// deepest path.
const RENDER_STACK_SIZE: usize = 256 * 1024 * 1024;

fn to_json<T: Serialize + ?Sized>(value: &T, style: JsonStyle) -> Result<String, ReportError> {
    let rendered = match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(value),
        JsonStyle::Compact => serde_json::to_string(value),
    };
    let mut json = rendered.map_err(|e| ReportError::Serialize {
        message: e.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

/// Run `render` on a scoped thread with [`RENDER_STACK_SIZE`] of stack.
fn on_render_stack<F>(render: F) -> Result<String, ReportError>
where
    F: FnOnce() -> Result<String, ReportError> + Send,
{
    std::thread::scope(|scope| {
        let handle = std::thread::Builder::new()
            .name("depreport-render".to_string())
            .stack_size(RENDER_STACK_SIZE)
            .spawn_scoped(scope, render)
            .map_err(ReportError::Io)?;
        handle.join().map_err(|_| ReportError::Serialize {
            message: "report renderer panicked".to_string(),
        })?
    })
}

/// Render the tree variant.
pub fn render_tree_document(
    trees: &[ConfigurationTree],
    layout: TreeLayout,
    style: JsonStyle,
) -> Result<String, ReportError> {
    on_render_stack(|| match layout {
        TreeLayout::Grouped => to_json(trees, style),
        TreeLayout::Merged => {
            let roots: Vec<&DependencyInfo> =
                trees.iter().flat_map(|t| t.dependencies.iter()).collect();
            to_json(&roots, style)
        }
    })
}

/// Render the flat artifact variant.
pub fn render_artifact_document(reports: &[ConfigurationReport]) -> Result<String, ReportError> {
    to_json(reports, JsonStyle::Pretty)
}

/// Write a rendered document to `dest`, creating parent directories.
///
/// Returns the absolute path of the written file.
pub fn write_report(dest: &Path, document: &str) -> Result<PathBuf, ReportError> {
    let written = write_atomic(dest, document.as_bytes())?;
    tracing::info!("wrote report to {}", written.display());
    Ok(written)
}
