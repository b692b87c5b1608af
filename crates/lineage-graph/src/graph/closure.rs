//! Transitive closure and transitive reduction.
//!
//! # Overview
//!
//! Both operations build a **new** [`LineageGraph`] over a vertex set that
//! is isomorphic to the source graph's:
//!
//! 1. **Transitive Closure**: adds an edge `u → v` for every `v` reachable
//!    from `u` through one or more edges.
//!
//! 2. **Transitive Reduction**: keeps only the edges needed to preserve
//!    reachability. An edge `A → C` is redundant if there is already a path
//!    `A → B → C`.
//!
//! # Vertex Correspondence
//!
//! Source vertices are copied in storage order. A dense `Vec` indexed by the
//! source slot maps each source vertex to its copy, so properties can be
//! carried over according to [`CopyFlags`]. Properties are cloned, never
//! shared.

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use petgraph::{
    algo::toposort,
    stable_graph::NodeIndex,
    visit::{EdgeRef, IntoEdgeReferences, NodeIndexable},
    Direction,
};
use tracing::{debug, instrument, warn};

use crate::error::{GraphError, Result};
use crate::graph::handle::{CopyFlags, Edge, Vertex};
use crate::graph::store::LineageGraph;

// ---------------------------------------------------------------------------
// Reduction
// ---------------------------------------------------------------------------

/// Result of [`LineageGraph::transitive_reduction`].
#[derive(Debug, Clone)]
pub struct Reduction<V, E> {
    /// The reduced graph (a new, independent graph).
    pub graph: LineageGraph<V, E>,
    /// Edges of the *source* graph that have no counterpart in `graph`.
    pub removed_edges: Vec<Edge>,
}

// ---------------------------------------------------------------------------
// VertexMap
// ---------------------------------------------------------------------------

/// Source-slot → copied-vertex map.
struct VertexMap(Vec<Option<NodeIndex>>);

impl VertexMap {
    fn get(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.0.get(idx.index()).copied().flatten()
    }
}

impl<V, E> LineageGraph<V, E>
where
    V: Clone + Default,
    E: Clone + Default,
{
    /// Return a new graph with an edge `u → v` wherever `v` is reachable
    /// from `u` in this graph.
    ///
    /// A vertex on a cycle reaches itself and therefore gets a self-loop.
    /// Closure edges that also exist in this graph take that edge's
    /// properties when `flags.edge_properties` is set; every other edge
    /// gets `E::default()`.
    #[must_use]
    #[instrument(skip(self), fields(vertices = self.vertex_count(), edges = self.edge_count()))]
    pub fn transitive_closure(&self, flags: CopyFlags) -> Self {
        let (mut closure, map) = self.copy_vertices(flags);
        let bound = self.graph.node_bound();

        for u in self.graph.node_indices() {
            let Some(cu) = map.get(u) else { continue };

            // BFS over paths of length >= 1, so `u` is only revisited
            // through a cycle.
            let mut seen = FixedBitSet::with_capacity(bound);
            let mut queue: VecDeque<NodeIndex> = self
                .graph
                .neighbors_directed(u, Direction::Outgoing)
                .collect();
            for &n in &queue {
                seen.insert(n.index());
            }

            while let Some(v) = queue.pop_front() {
                if let Some(cv) = map.get(v) {
                    let props = self.carried_edge_properties(u, v, flags);
                    closure.graph.add_edge(cu, cv, props);
                }
                for w in self.graph.neighbors_directed(v, Direction::Outgoing) {
                    if !seen.put(w.index()) {
                        queue.push_back(w);
                    }
                }
            }
        }

        debug!(edges = closure.edge_count(), "transitive closure complete");
        closure
    }

    /// Return a new graph with the fewest edges whose closure equals this
    /// graph's closure, plus the list of this graph's edges that were
    /// dropped.
    ///
    /// # Algorithm
    ///
    /// Process vertices in reverse topological order (sinks first). For
    /// each vertex `u`, the set of vertices reachable from `u` is the union
    /// of its direct successors and their reachable sets. An edge `(u, v)` is
    /// redundant if `v` is reachable from another direct successor `w ≠ v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CycleDetected`] if the graph has a cycle; the
    /// reduction of a cyclic graph is not unique.
    #[instrument(skip(self), fields(vertices = self.vertex_count(), edges = self.edge_count()))]
    pub fn transitive_reduction(&self, flags: CopyFlags) -> Result<Reduction<V, E>> {
        let topo = toposort(&self.graph, None).map_err(|cycle| {
            let vertex = Vertex::from_node(cycle.node_id());
            warn!(%vertex, "transitive reduction requires an acyclic graph");
            GraphError::CycleDetected { vertex }
        })?;

        let bound = self.graph.node_bound();
        let mut reachable: Vec<FixedBitSet> = vec![FixedBitSet::with_capacity(bound); bound];

        for &u in topo.iter().rev() {
            let mut reach_u = FixedBitSet::with_capacity(bound);
            for v in self.graph.neighbors_directed(u, Direction::Outgoing) {
                reach_u.insert(v.index());
                reach_u.union_with(&reachable[v.index()]);
            }
            reachable[u.index()] = reach_u;
        }

        let (mut reduced, map) = self.copy_vertices(flags);
        let mut removed_edges = Vec::new();

        for e in self.graph.edge_references() {
            let (u, v) = (e.source(), e.target());
            let redundant = self
                .graph
                .neighbors_directed(u, Direction::Outgoing)
                .filter(|&w| w != v)
                .any(|w| reachable[w.index()].contains(v.index()));

            match (redundant, map.get(u), map.get(v)) {
                (false, Some(cu), Some(cv)) => {
                    let props = if flags.edge_properties {
                        e.weight().clone()
                    } else {
                        E::default()
                    };
                    reduced.graph.add_edge(cu, cv, props);
                }
                _ => removed_edges.push(Edge::from_edge(e.id())),
            }
        }

        debug!(
            kept = reduced.edge_count(),
            removed = removed_edges.len(),
            "transitive reduction complete"
        );
        Ok(Reduction {
            graph: reduced,
            removed_edges,
        })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Copy every vertex (and optionally its properties) into a fresh,
    /// edgeless graph with the same orientation.
    fn copy_vertices(&self, flags: CopyFlags) -> (Self, VertexMap) {
        let mut copy = Self::new(self.orientation);
        let mut map = vec![None; self.graph.node_bound()];

        for idx in self.graph.node_indices() {
            let props = if flags.vertex_properties {
                self.graph[idx].clone()
            } else {
                V::default()
            };
            map[idx.index()] = Some(copy.graph.add_node(props));
        }

        (copy, VertexMap(map))
    }

    fn carried_edge_properties(&self, u: NodeIndex, v: NodeIndex, flags: CopyFlags) -> E {
        if !flags.edge_properties {
            return E::default();
        }
        self.graph
            .find_edge(u, v)
            .map(|e| self.graph[e].clone())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
