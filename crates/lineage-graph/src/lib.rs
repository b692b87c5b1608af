#![forbid(unsafe_code)]
//! lineage-graph library.
//!
//! A generic directed graph with vertex and edge properties, plus the
//! algorithms needed to reason about derivation lineage: topological order,
//! transitive closure and reduction, roots and leaves, shortest paths and the
//! longest path through a vertex.
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return [`Result`] with a [`GraphError`].
//!   Lookup misses are not errors; they return a null handle, `None` or an
//!   empty `Vec`.
//! - **Logging**: Use `tracing` macros (`warn!`, `debug!`, `trace!`). The
//!   library never installs a subscriber.
//! - **Threading**: Single owner. Mutation takes `&mut self`; share across
//!   threads behind a lock.

pub mod error;
pub mod graph;

pub use error::{ErrorCode, GraphError, Handle, Result};
pub use graph::{Adjacency, CopyFlags, Edge, LineageGraph, Orientation, Reduction, Vertex};
