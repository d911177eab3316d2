//! Core data types for depreport.
//!
//! This crate defines the report model written to disk, the resolution
//! snapshot exported by the build tool's resolver, and the project
//! configuration read from `depreport.toml`.
//!
//! This crate is intentionally free of async code and graph traversal.

/// File name of the optional project configuration.
pub const CONFIG_FILE: &str = "depreport.toml";

pub mod config;
pub mod coordinate;
pub mod report;
pub mod snapshot;
