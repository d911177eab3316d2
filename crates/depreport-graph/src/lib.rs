//! Resolved dependency graph and traversal.
//!
//! [`graph::ResolvedGraph`] turns a resolution snapshot into a petgraph
//! graph and exposes it through the read-only [`view::ResolutionView`]
//! trait. [`walker`] walks that view per configuration and produces
//! conflict-annotated dependency trees.

pub mod graph;
pub mod view;
pub mod walker;
