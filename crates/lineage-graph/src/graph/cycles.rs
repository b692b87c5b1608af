//! Cycle detection helpers.
//!
//! # Edge Direction
//!
//! Adding a new edge `from → to` would create a cycle if `from` is already
//! reachable from `to` through existing edges. Lineage graphs are expected to
//! be acyclic; these helpers let callers check before they mutate, or find
//! the offending loops after an algorithm reported
//! [`CycleDetected`](crate::GraphError::CycleDetected).

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::{
    algo::{is_cyclic_directed, tarjan_scc},
    stable_graph::NodeIndex,
    Direction,
};

use crate::graph::handle::Vertex;
use crate::graph::store::LineageGraph;

impl<V, E> LineageGraph<V, E> {
    /// Check whether adding `from → to` would introduce a cycle.
    ///
    /// Returns the cycle the new edge would close, formatted as
    /// `from → to → … → from`. A self-edge yields `[v, v]`.
    ///
    /// Returns `None` if no cycle would form, if the edge already exists
    /// (no *new* cycle is created), or if either handle is not live.
    #[must_use]
    pub fn would_create_cycle(&self, from: Vertex, to: Vertex) -> Option<Vec<Vertex>> {
        let (Ok(f), Ok(t)) = (self.live(from), self.live(to)) else {
            return None;
        };

        if f == t {
            return Some(vec![from, from]);
        }

        if self.graph.contains_edge(f, t) {
            return None;
        }

        // BFS from `to` looking for `from`.
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([t]);
        let mut visited: HashSet<NodeIndex> = HashSet::from([t]);
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        while let Some(current) = queue.pop_front() {
            if current == f {
                return Some(reconstruct_cycle_path(f, t, &parent));
            }

            for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if visited.insert(next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Find all cycles currently present.
    ///
    /// Each entry is one strongly connected component with more than one
    /// member, or a single vertex with a self-loop. Members are sorted by
    /// slot and the list of components is sorted too.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Vec<Vertex>> {
        let mut cycles: Vec<Vec<Vertex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&node| self.graph.contains_edge(node, node))
            })
            .map(|component| {
                let mut members: Vec<Vertex> = component.into_iter().map(Vertex::from_node).collect();
                members.sort_unstable();
                members
            })
            .collect();

        cycles.sort_unstable();
        cycles
    }

    /// Return `true` if the graph has no cycles (self-loops included).
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }
}

/// Rebuild `from → to → … → from` from BFS parent links.
///
/// Parent links describe a path `to → … → from`; `from` is prepended to
/// stand for the edge being added.
fn reconstruct_cycle_path(
    from: NodeIndex,
    to: NodeIndex,
    parent: &HashMap<NodeIndex, NodeIndex>,
) -> Vec<Vertex> {
    let mut to_to_from: Vec<NodeIndex> = vec![from];
    let mut cursor = from;

    while cursor != to {
        if let Some(&next) = parent.get(&cursor) {
            cursor = next;
            to_to_from.push(cursor);
        } else {
            break;
        }
    }

    to_to_from.reverse();

    let mut cycle = Vec::with_capacity(to_to_from.len() + 1);
    cycle.push(Vertex::from_node(from));
    cycle.extend(to_to_from.into_iter().map(Vertex::from_node));
    cycle
}
