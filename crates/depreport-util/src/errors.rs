use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depreport operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The resolution snapshot is missing or malformed.
    #[error("Snapshot error: {message}")]
    #[diagnostic(help(
        "Export the resolved graph from your build tool, or pass --snapshot <PATH>"
    ))]
    Snapshot { message: String },

    /// Invalid `depreport.toml` or configuration selection.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your depreport.toml for syntax errors"))]
    Config { message: String },

    /// The report could not be written to its destination.
    #[error("Failed to write report to {}: {source}", .path.display())]
    #[diagnostic(help("Check that the output directory is writable"))]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report document could not be serialized.
    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
