//! Graph storage, mutation primitives and adjacency queries.
//!
//! # Storage
//!
//! [`LineageGraph`] wraps a petgraph [`StableDiGraph`]. Stable indices mean
//! that removing a vertex never renumbers the survivors, so every handle
//! other than the removed vertex (and its incident edges) stays valid.
//!
//! ## Edge Direction
//!
//! An edge `a → b` is stored as-is. Whether that reads "a derives b" or
//! "a is derived from b" is decided by the graph's [`Orientation`], which
//! only affects [`LineageGraph::roots`], [`LineageGraph::leaves`] and the
//! ordering of [`LineageGraph::longest_path_touching`].
//!
//! ## No Multi-Edges
//!
//! petgraph allows parallel edges by default. [`LineageGraph::add_edge`]
//! looks up the ordered pair first and hands back the existing edge, so at
//! most one edge ever connects `(a, b)`.

#![allow(clippy::module_name_repetitions)]

use petgraph::{
    stable_graph::{NodeIndex, StableDiGraph},
    visit::{EdgeRef, IntoEdgeReferences},
    Direction,
};
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::handle::{Adjacency, Edge, Orientation, Vertex};

// ---------------------------------------------------------------------------
// LineageGraph
// ---------------------------------------------------------------------------

/// A directed graph with vertex properties `V` and edge properties `E`.
///
/// Cloning performs a deep copy; the clone shares nothing with the source.
#[derive(Debug, Clone)]
pub struct LineageGraph<V, E = ()> {
    pub(crate) graph: StableDiGraph<V, E>,
    pub(crate) orientation: Orientation,
}

impl<V, E> Default for LineageGraph<V, E> {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl<V, E> LineageGraph<V, E> {
    /// Create an empty graph whose edges carry the given meaning.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            graph: StableDiGraph::default(),
            orientation,
        }
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Remove every vertex and edge. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    // -----------------------------------------------------------------------
    // Vertices
    // -----------------------------------------------------------------------

    /// Add a vertex with default properties.
    pub fn add_default_vertex(&mut self) -> Vertex
    where
        V: Default,
    {
        self.add_vertex(V::default())
    }

    /// Add a vertex carrying `properties`.
    pub fn add_vertex(&mut self, properties: V) -> Vertex {
        Vertex::from_node(self.graph.add_node(properties))
    }

    /// Remove `v` together with every edge incident to it.
    ///
    /// A null or already-removed handle is a no-op and returns `None`.
    /// Otherwise the removed vertex's properties are returned.
    pub fn remove_vertex(&mut self, v: Vertex) -> Option<V> {
        let idx = v.node()?;
        let removed = self.graph.remove_node(idx);
        if removed.is_some() {
            trace!(vertex = %v, "removed vertex and incident edges");
        }
        removed
    }

    /// Return `true` if `v` refers to a live vertex of this graph.
    #[must_use]
    pub fn contains_vertex(&self, v: Vertex) -> bool {
        v.node().is_some_and(|idx| self.graph.contains_node(idx))
    }

    #[must_use]
    pub fn vertex_properties(&self, v: Vertex) -> Option<&V> {
        self.graph.node_weight(v.node()?)
    }

    /// Replace the properties of `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] if `v` is null or removed.
    pub fn set_vertex_properties(&mut self, v: Vertex, properties: V) -> Result<()> {
        let slot = v
            .node()
            .and_then(|idx| self.graph.node_weight_mut(idx))
            .ok_or(GraphError::invalid_vertex(v))?;
        *slot = properties;
        Ok(())
    }

    /// Return the first vertex, in storage order, whose properties equal
    /// `value`, or the null vertex.
    ///
    /// Storage order is ascending slot index. When several vertices match,
    /// the one in the lowest slot wins; slots can be reused after removal so
    /// callers should not depend on which of several matches comes back.
    #[must_use]
    pub fn find_vertex_by_properties<T>(&self, value: &T) -> Vertex
    where
        T: ?Sized,
        V: PartialEq<T>,
    {
        self.graph
            .node_indices()
            .find(|&idx| self.graph[idx] == *value)
            .map_or_else(Vertex::null, Vertex::from_node)
    }

    /// All vertices in storage order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.graph.node_indices().map(Vertex::from_node).collect()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    /// Connect `v1 → v2` with default edge properties.
    ///
    /// If the edge already exists its handle is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] if either endpoint is null or
    /// removed.
    pub fn add_edge(&mut self, v1: Vertex, v2: Vertex) -> Result<Edge>
    where
        E: Default,
    {
        let (a, b) = self.endpoint_pair(v1, v2)?;
        if let Some(existing) = self.graph.find_edge(a, b) {
            trace!(source = %v1, target = %v2, "edge already present");
            return Ok(Edge::from_edge(existing));
        }
        Ok(Edge::from_edge(self.graph.add_edge(a, b, E::default())))
    }

    /// Connect `v1 → v2` carrying `properties`.
    ///
    /// If the edge already exists its properties are replaced and the
    /// existing handle is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] if either endpoint is null or
    /// removed.
    pub fn add_edge_with(&mut self, v1: Vertex, v2: Vertex, properties: E) -> Result<Edge> {
        let (a, b) = self.endpoint_pair(v1, v2)?;
        match self.graph.find_edge(a, b) {
            Some(existing) => {
                self.graph[existing] = properties;
                Ok(Edge::from_edge(existing))
            }
            None => Ok(Edge::from_edge(self.graph.add_edge(a, b, properties))),
        }
    }

    /// The edge `v1 → v2`, or the null edge.
    #[must_use]
    pub fn edge(&self, v1: Vertex, v2: Vertex) -> Edge {
        match (self.live(v1), self.live(v2)) {
            (Ok(a), Ok(b)) => Edge::from_lookup(self.graph.find_edge(a, b)),
            _ => Edge::null(),
        }
    }

    #[must_use]
    pub fn has_edge(&self, v1: Vertex, v2: Vertex) -> bool {
        !self.edge(v1, v2).is_null()
    }

    /// Return `true` if an edge joins `v1` and `v2` in either direction.
    #[must_use]
    pub fn is_connected(&self, v1: Vertex, v2: Vertex) -> bool {
        self.has_edge(v1, v2) || self.has_edge(v2, v1)
    }

    #[must_use]
    pub fn edge_properties(&self, e: Edge) -> Option<&E> {
        self.graph.edge_weight(e.edge()?)
    }

    /// Properties of the edge `v1 → v2`, or `E::default()` if there is none.
    #[must_use]
    pub fn edge_properties_between(&self, v1: Vertex, v2: Vertex) -> E
    where
        E: Clone + Default,
    {
        self.edge_properties(self.edge(v1, v2))
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the properties of `e`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] if `e` is null or was removed
    /// along with one of its endpoints.
    pub fn set_edge_properties(&mut self, e: Edge, properties: E) -> Result<()> {
        let slot = e
            .edge()
            .and_then(|idx| self.graph.edge_weight_mut(idx))
            .ok_or(GraphError::invalid_edge(e))?;
        *slot = properties;
        Ok(())
    }

    /// `(source, target)` of `e`, or `None` for a null or stale handle.
    #[must_use]
    pub fn endpoints(&self, e: Edge) -> Option<(Vertex, Vertex)> {
        self.graph
            .edge_endpoints(e.edge()?)
            .map(|(a, b)| (Vertex::from_node(a), Vertex::from_node(b)))
    }

    /// All edges as `(source, target)` pairs, in edge storage order.
    #[must_use]
    pub fn edges(&self) -> Vec<(Vertex, Vertex)> {
        self.graph
            .edge_references()
            .map(|e| (Vertex::from_node(e.source()), Vertex::from_node(e.target())))
            .collect()
    }

    /// All edge handles, in edge storage order.
    #[must_use]
    pub fn edge_handles(&self) -> Vec<Edge> {
        self.graph.edge_indices().map(Edge::from_edge).collect()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Neighbours of `v`: outbound targets first, then inbound sources,
    /// each group in ascending slot order.
    ///
    /// A vertex joined to `v` in both directions appears in both groups
    /// when `adjacency` is [`Adjacency::All`].
    #[must_use]
    pub fn adjacent_vertices(&self, v: Vertex, adjacency: Adjacency) -> Vec<Vertex> {
        let Some(idx) = v.node() else {
            return Vec::new();
        };

        let mut out = Vec::new();
        if adjacency.outbound() {
            out.extend(self.sorted_neighbors(idx, Direction::Outgoing));
        }
        if adjacency.inbound() {
            out.extend(self.sorted_neighbors(idx, Direction::Incoming));
        }
        out
    }

    /// Number of outgoing edges; 0 for a null or stale handle.
    #[must_use]
    pub fn out_degree(&self, v: Vertex) -> usize {
        self.degree(v, Direction::Outgoing)
    }

    /// Number of incoming edges; 0 for a null or stale handle.
    #[must_use]
    pub fn in_degree(&self, v: Vertex) -> usize {
        self.degree(v, Direction::Incoming)
    }

    /// Vertices without parents, according to the graph's orientation.
    #[must_use]
    pub fn roots(&self) -> Vec<Vertex> {
        self.zero_degree(self.parent_direction())
    }

    /// Vertices without children, according to the graph's orientation.
    #[must_use]
    pub fn leaves(&self) -> Vec<Vertex> {
        self.zero_degree(self.parent_direction().opposite())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Direction in which a vertex's parents are found.
    const fn parent_direction(&self) -> Direction {
        match self.orientation {
            Orientation::ParentToChild => Direction::Incoming,
            Orientation::ChildToParent => Direction::Outgoing,
        }
    }

    fn zero_degree(&self, dir: Direction) -> Vec<Vertex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_directed(idx, dir).next().is_none())
            .map(Vertex::from_node)
            .collect()
    }

    fn degree(&self, v: Vertex, dir: Direction) -> usize {
        v.node()
            .filter(|&idx| self.graph.contains_node(idx))
            .map_or(0, |idx| self.graph.edges_directed(idx, dir).count())
    }

    fn sorted_neighbors(&self, idx: NodeIndex, dir: Direction) -> Vec<Vertex> {
        if !self.graph.contains_node(idx) {
            return Vec::new();
        }
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(idx, dir).collect();
        neighbors.sort_unstable();
        neighbors.into_iter().map(Vertex::from_node).collect()
    }

    /// Resolve a live vertex or report it as an invalid handle.
    pub(crate) fn live(&self, v: Vertex) -> Result<NodeIndex> {
        v.node()
            .filter(|&idx| self.graph.contains_node(idx))
            .ok_or(GraphError::invalid_vertex(v))
    }

    /// Resolve a live `(v1, v2)` pair or report the first bad handle.
    fn endpoint_pair(&self, v1: Vertex, v2: Vertex) -> Result<(NodeIndex, NodeIndex)> {
        Ok((self.live(v1)?, self.live(v2)?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
