//! The lineage graph engine.
//!
//! # Overview
//!
//! [`LineageGraph`] is a directed graph whose vertices and edges carry
//! caller-defined properties. It models derivation lineage: an original
//! artifact and the versions derived from it, with an edge per derivation
//! step.
//!
//! ## Pipeline
//!
//! ```text
//! add_vertex / add_edge            (store)
//!        ↓
//! LineageGraph<V, E>
//!   ├─ topological_sort()          (topo)
//!   ├─ transitive_closure()        (closure)
//!   ├─ transitive_reduction()      (closure)
//!   ├─ shortest_path()             (path)
//!   ├─ longest_path_touching()     (path)
//!   └─ find_cycles()               (cycles)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use lineage_graph::{CopyFlags, LineageGraph, Orientation};
//!
//! let mut g: LineageGraph<&str> = LineageGraph::new(Orientation::ParentToChild);
//! let original = g.add_vertex("IMG_0001.jpg");
//! let cropped = g.add_vertex("IMG_0001_crop.jpg");
//! let toned = g.add_vertex("IMG_0001_crop_bw.jpg");
//! g.add_edge(original, cropped)?;
//! g.add_edge(cropped, toned)?;
//! g.add_edge(original, toned)?;
//!
//! assert_eq!(g.roots(), vec![original]);
//! assert_eq!(g.longest_path_touching(cropped)?, vec![original, cropped, toned]);
//!
//! let reduced = g.transitive_reduction(CopyFlags::ALL)?;
//! assert_eq!(reduced.removed_edges, vec![g.edge(original, toned)]);
//! # Ok::<(), lineage_graph::GraphError>(())
//! ```

pub mod closure;
pub mod cycles;
pub mod handle;
pub mod path;
pub mod store;
pub mod topo;

// Re-export primary types at module level for convenience.
pub use closure::Reduction;
pub use handle::{Adjacency, CopyFlags, Edge, Orientation, Vertex};
pub use store::LineageGraph;
