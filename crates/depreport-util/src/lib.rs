//! Shared utilities for depreport.
//!
//! This crate provides cross-cutting concerns used by the other depreport
//! crates: the error type, filesystem helpers, and terminal status lines.

pub mod errors;
pub mod fs;
pub mod progress;
