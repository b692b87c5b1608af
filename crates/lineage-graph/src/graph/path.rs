//! Unit-weight path search: shortest path between two vertices and the
//! longest root-to-leaf path through a vertex.
//!
//! # Overview
//!
//! Both queries share [`PathSearch`], a single-source search that records a
//! distance and a predecessor for every vertex it reaches. The search runs
//! over a *view* of the graph: [`Direction::Outgoing`] follows edges as
//! stored, [`Direction::Incoming`] follows them reversed.
//!
//! | Mode     | Algorithm                                   | Wins    |
//! |----------|---------------------------------------------|---------|
//! | shortest | BFS                                         | smaller |
//! | longest  | relaxation in topological order (DAG only)  | larger  |
//!
//! # Reachability
//!
//! A vertex that was never reached is its own predecessor, and so is the
//! root. `v` counts as reachable iff `predecessor(v) != v`.
//!
//! # Tie-breaks
//!
//! When several vertices share the maximum distance in longest mode, the one
//! in the lowest slot is chosen. Equal-length alternatives along the way keep
//! whichever predecessor was found first. No claim is made that the result is
//! *the* unique longest path.

#![allow(clippy::module_name_repetitions)]

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use fixedbitset::FixedBitSet;
use petgraph::{
    stable_graph::{NodeIndex, StableDiGraph},
    visit::NodeIndexable,
    Direction,
};
use tracing::{debug, instrument, trace, warn};

use crate::error::{GraphError, Result};
use crate::graph::handle::{Orientation, Vertex};
use crate::graph::store::LineageGraph;

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// Distance and predecessor maps from one search root.
///
/// Only reached vertices are stored; a missing distance means "no path" and
/// a missing predecessor means "self".
#[derive(Debug)]
pub(crate) struct PathSearch {
    root: NodeIndex,
    distances: HashMap<NodeIndex, usize>,
    predecessors: HashMap<NodeIndex, NodeIndex>,
}

impl PathSearch {
    fn rooted_at(root: NodeIndex) -> Self {
        Self {
            root,
            distances: HashMap::from([(root, 0)]),
            predecessors: HashMap::new(),
        }
    }

    /// Minimum-hop search from `root` over the `dir` view.
    pub(crate) fn shortest<V, E>(
        graph: &StableDiGraph<V, E>,
        root: NodeIndex,
        dir: Direction,
    ) -> Self {
        let mut search = Self::rooted_at(root);
        let mut queue = VecDeque::from([root]);

        while let Some(u) = queue.pop_front() {
            let next = search.distances[&u] + 1;
            for w in graph.neighbors_directed(u, dir) {
                if search.distances.contains_key(&w) {
                    continue;
                }
                search.distances.insert(w, next);
                search.predecessors.insert(w, u);
                queue.push_back(w);
            }
        }

        search
    }

    /// Maximum-hop search from `root` over the `dir` view.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MalformedGraph`] if a cycle is reachable from
    /// `root`; longest paths are undefined there.
    pub(crate) fn longest<V, E>(
        graph: &StableDiGraph<V, E>,
        root: NodeIndex,
        dir: Direction,
    ) -> Result<Self> {
        let order = reachable_topological_order(graph, root, dir)?;
        let mut search = Self::rooted_at(root);

        for u in order {
            let Some(du) = search.distances.get(&u).copied() else {
                continue;
            };
            for w in graph.neighbors_directed(u, dir) {
                let candidate = du + 1;
                if search.distances.get(&w).is_none_or(|&dw| candidate > dw) {
                    search.distances.insert(w, candidate);
                    search.predecessors.insert(w, u);
                }
            }
        }

        Ok(search)
    }

    pub(crate) fn predecessor(&self, v: NodeIndex) -> NodeIndex {
        self.predecessors.get(&v).copied().unwrap_or(v)
    }

    pub(crate) fn distance(&self, v: NodeIndex) -> Option<usize> {
        self.distances.get(&v).copied()
    }

    pub(crate) fn is_reachable(&self, v: NodeIndex) -> bool {
        self.predecessor(v) != v
    }

    /// The reached vertex farthest from the root (distance ≥ 1), lowest slot
    /// first on ties.
    pub(crate) fn most_remote(&self) -> Option<NodeIndex> {
        self.distances
            .iter()
            .filter(|&(_, &d)| d >= 1)
            .max_by_key(|&(&v, &d)| (d, Reverse(v)))
            .map(|(&v, _)| v)
    }

    /// Walk predecessors from `from` back towards the root.
    ///
    /// Returns `[from, pred(from), …]`, excluding the root. An unreached
    /// `from` yields an empty list.
    pub(crate) fn walk_to_root(&self, from: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut cursor = from;
        while cursor != self.root {
            let prev = self.predecessor(cursor);
            if prev == cursor {
                // Not reached; nothing to walk.
                return Vec::new();
            }
            out.push(cursor);
            cursor = prev;
        }
        out
    }
}

/// Topological order of the vertices reachable from `root` over `dir`.
///
/// Iterative DFS with an on-stack set; hitting a vertex that is still on the
/// stack means a back edge.
fn reachable_topological_order<V, E>(
    graph: &StableDiGraph<V, E>,
    root: NodeIndex,
    dir: Direction,
) -> Result<Vec<NodeIndex>> {
    let bound = graph.node_bound();
    let mut on_stack = FixedBitSet::with_capacity(bound);
    let mut finished = FixedBitSet::with_capacity(bound);
    let mut postorder = Vec::new();

    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>)> =
        vec![(root, graph.neighbors_directed(root, dir).collect())];
    on_stack.insert(root.index());

    while let Some(top) = stack.last_mut() {
        let node = top.0;
        match top.1.pop() {
            Some(next) => {
                if on_stack.contains(next.index()) {
                    return Err(GraphError::MalformedGraph {
                        reason: format!(
                            "cycle through {} reachable from {}",
                            Vertex::from_node(next),
                            Vertex::from_node(root)
                        ),
                    });
                }
                if !finished.contains(next.index()) {
                    on_stack.insert(next.index());
                    stack.push((next, graph.neighbors_directed(next, dir).collect()));
                }
            }
            None => {
                stack.pop();
                on_stack.set(node.index(), false);
                finished.insert(node.index());
                postorder.push(node);
            }
        }
    }

    postorder.reverse();
    Ok(postorder)
}

// ---------------------------------------------------------------------------
// Public queries
// ---------------------------------------------------------------------------

impl<V, E> LineageGraph<V, E> {
    /// Shortest path between `v1` and `v2`, as `[v1, …, v2]`.
    ///
    /// The path is first searched along the edges from `v1`. If `v2` is not
    /// reachable that way, it is searched from `v2` instead; the result
    /// still starts at `v1` and then follows edges backwards.
    ///
    /// Returns an empty list if the vertices are not connected either way,
    /// if either is null or removed, or if `v1 == v2`.
    #[must_use]
    #[instrument(skip(self))]
    pub fn shortest_path(&self, v1: Vertex, v2: Vertex) -> Vec<Vertex> {
        let (Ok(a), Ok(b)) = (self.live(v1), self.live(v2)) else {
            return Vec::new();
        };

        let forward = PathSearch::shortest(&self.graph, a, Direction::Outgoing);
        if forward.is_reachable(b) {
            let mut path: Vec<Vertex> = forward
                .walk_to_root(b)
                .into_iter()
                .rev()
                .map(Vertex::from_node)
                .collect();
            path.insert(0, v1);
            trace!(hops = forward.distance(b), "forward path found");
            return path;
        }

        let backward = PathSearch::shortest(&self.graph, b, Direction::Outgoing);
        if backward.is_reachable(a) {
            let mut path: Vec<Vertex> = backward
                .walk_to_root(a)
                .into_iter()
                .map(Vertex::from_node)
                .collect();
            path.push(v2);
            trace!(hops = backward.distance(a), "reverse path found");
            return path;
        }

        Vec::new()
    }

    /// The longest path that passes through `v`, read from a root to a leaf.
    ///
    /// The most remote ancestor and the most remote descendant of `v` are
    /// found with longest-mode searches over the reversed and the forward
    /// graph. Under [`Orientation::ChildToParent`] the stored edges point
    /// upwards, so the joined path is reversed to keep root-first order.
    ///
    /// A null `v` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidHandle`] for a removed vertex and
    /// [`GraphError::MalformedGraph`] if a cycle is reachable from `v` in
    /// either direction.
    #[instrument(skip(self))]
    pub fn longest_path_touching(&self, v: Vertex) -> Result<Vec<Vertex>> {
        if v.is_null() {
            return Ok(Vec::new());
        }
        let n = self.live(v)?;

        let upstream = PathSearch::longest(&self.graph, n, Direction::Incoming)
            .inspect_err(|err| warn!(%err, vertex = %v, "longest path: upstream search failed"))?;
        let downstream = PathSearch::longest(&self.graph, n, Direction::Outgoing)
            .inspect_err(|err| warn!(%err, vertex = %v, "longest path: downstream search failed"))?;

        // Reversed view: predecessors point back towards `v`, so walking from
        // the remote end already yields edge order.
        let mut path: Vec<Vertex> = upstream
            .most_remote()
            .map(|far| upstream.walk_to_root(far))
            .unwrap_or_default()
            .into_iter()
            .map(Vertex::from_node)
            .collect();

        path.push(v);

        if let Some(far) = downstream.most_remote() {
            path.extend(
                downstream
                    .walk_to_root(far)
                    .into_iter()
                    .rev()
                    .map(Vertex::from_node),
            );
        }

        if self.orientation == Orientation::ChildToParent {
            path.reverse();
        }

        debug!(len = path.len(), "longest path touching vertex");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
