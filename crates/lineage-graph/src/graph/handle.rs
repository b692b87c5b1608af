//! Vertex and edge handles plus the small option types used across the engine.
//!
//! Handles are thin wrappers around petgraph indices with an explicit null
//! state. A default-constructed handle is null, and no operation that
//! creates an element ever returns one.

use std::fmt;

use petgraph::stable_graph::{EdgeIndex, NodeIndex};

// ---------------------------------------------------------------------------
// Vertex
// ---------------------------------------------------------------------------

/// Opaque, copyable handle to a vertex of a [`LineageGraph`](crate::LineageGraph).
///
/// Ordering follows the internal slot index, with the null vertex first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(Option<NodeIndex>);

impl Vertex {
    /// The "no vertex" handle.
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }

    /// Slot index inside the owning graph, `None` for the null vertex.
    ///
    /// Slots are stable while the vertex lives but may be reused after it is
    /// removed.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        self.0.map(NodeIndex::index)
    }

    pub(crate) const fn from_node(idx: NodeIndex) -> Self {
        Self(Some(idx))
    }

    pub(crate) const fn node(self) -> Option<NodeIndex> {
        self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(idx) => write!(f, "#{}", idx.index()),
            None => f.write_str("null"),
        }
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// Opaque, copyable handle to a directed edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(Option<EdgeIndex>);

impl Edge {
    /// The "no edge" handle.
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn index(self) -> Option<usize> {
        self.0.map(EdgeIndex::index)
    }

    pub(crate) const fn from_edge(idx: EdgeIndex) -> Self {
        Self(Some(idx))
    }

    /// Null when the lookup found nothing.
    pub(crate) const fn from_lookup(idx: Option<EdgeIndex>) -> Self {
        Self(idx)
    }

    pub(crate) const fn edge(self) -> Option<EdgeIndex> {
        self.0
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(idx) => write!(f, "#{}", idx.index()),
            None => f.write_str("null"),
        }
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// What a stored edge `a → b` means.
///
/// Storage is identical for both variants. The orientation only changes how
/// [`roots`](crate::LineageGraph::roots), [`leaves`](crate::LineageGraph::leaves)
/// and [`longest_path_touching`](crate::LineageGraph::longest_path_touching)
/// read the edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// `a` is the parent, `b` the child (`a` derives `b`).
    #[default]
    ParentToChild,
    /// `a` is the child, `b` the parent.
    ChildToParent,
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Which incident edges [`adjacent_vertices`](crate::LineageGraph::adjacent_vertices)
/// follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Adjacency {
    Outbound,
    Inbound,
    #[default]
    All,
}

impl Adjacency {
    #[must_use]
    pub const fn outbound(self) -> bool {
        matches!(self, Self::Outbound | Self::All)
    }

    #[must_use]
    pub const fn inbound(self) -> bool {
        matches!(self, Self::Inbound | Self::All)
    }
}

// ---------------------------------------------------------------------------
// CopyFlags
// ---------------------------------------------------------------------------

/// Which properties are cloned into a derived graph (closure, reduction).
///
/// Anything not copied is left at its `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyFlags {
    pub vertex_properties: bool,
    pub edge_properties: bool,
}

impl CopyFlags {
    pub const NONE: Self = Self {
        vertex_properties: false,
        edge_properties: false,
    };
    pub const VERTEX_PROPERTIES: Self = Self {
        vertex_properties: true,
        edge_properties: false,
    };
    pub const EDGE_PROPERTIES: Self = Self {
        vertex_properties: false,
        edge_properties: true,
    };
    pub const ALL: Self = Self {
        vertex_properties: true,
        edge_properties: true,
    };
}

impl Default for CopyFlags {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::LineageGraph;

    #[test]
    fn default_handles_are_null() {
        assert!(Vertex::default().is_null());
        assert!(Edge::default().is_null());
        assert_eq!(Vertex::null().index(), None);
        assert_eq!(Edge::null().index(), None);
    }

    #[test]
    fn real_handles_never_equal_null() {
        let mut g: LineageGraph<()> = LineageGraph::default();
        let v = g.add_vertex(());
        assert!(!v.is_null());
        assert_ne!(v, Vertex::null());
        assert_eq!(v.index(), Some(0));
        assert_eq!(v.to_string(), "#0");
        assert_eq!(Vertex::null().to_string(), "null");
    }

    #[test]
    fn null_sorts_first() {
        let mut g: LineageGraph<()> = LineageGraph::default();
        let v = g.add_vertex(());
        assert!(Vertex::null() < v);
    }

    #[test]
    fn edge_handles_come_from_the_graph() {
        let mut g: LineageGraph<()> = LineageGraph::default();
        let a = g.add_vertex(());
        let b = g.add_vertex(());
        let e = g.add_edge(a, b).expect("a->b");
        assert!(!e.is_null());
        assert_eq!(e.index(), Some(0));
        assert_eq!(e.to_string(), "#0");
        assert!(g.edge(b, a).is_null());
        assert_eq!(Edge::null().to_string(), "null");
    }

    #[test]
    fn adjacency_flags() {
        assert!(Adjacency::All.inbound() && Adjacency::All.outbound());
        assert!(Adjacency::Outbound.outbound() && !Adjacency::Outbound.inbound());
        assert!(Adjacency::Inbound.inbound() && !Adjacency::Inbound.outbound());
        assert_eq!(Adjacency::default(), Adjacency::All);
    }

    #[test]
    fn copy_flags_default_copies_everything() {
        assert_eq!(CopyFlags::default(), CopyFlags::ALL);
        assert!(!CopyFlags::NONE.vertex_properties);
        assert!(CopyFlags::VERTEX_PROPERTIES.vertex_properties);
        assert!(!CopyFlags::VERTEX_PROPERTIES.edge_properties);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn orientation_serializes_snake_case() {
        let json = serde_json::to_string(&Orientation::ChildToParent).expect("serialize");
        assert_eq!(json, "\"child_to_parent\"");
        let back: Orientation = serde_json::from_str("\"parent_to_child\"").expect("deserialize");
        assert_eq!(back, Orientation::ParentToChild);
    }
}
