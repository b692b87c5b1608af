//! Topological ordering.

use petgraph::algo::toposort;
use tracing::{debug, instrument, warn};

use crate::error::{GraphError, Result};
use crate::graph::handle::Vertex;
use crate::graph::store::LineageGraph;

impl<V, E> LineageGraph<V, E> {
    /// Return every vertex ordered so that for each edge `u → v`, `u` comes
    /// before `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CycleDetected`] naming a vertex on a cycle when
    /// the graph is not acyclic. No partial ordering is returned in that
    /// case.
    #[instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn topological_sort(&self) -> Result<Vec<Vertex>> {
        match toposort(&self.graph, None) {
            Ok(order) => {
                debug!(len = order.len(), "topological sort complete");
                Ok(order.into_iter().map(Vertex::from_node).collect())
            }
            Err(cycle) => {
                let vertex = Vertex::from_node(cycle.node_id());
                warn!(%vertex, "topological sort failed: graph is cyclic");
                Err(GraphError::CycleDetected { vertex })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::graph::store::LineageGraph;

    fn position(order: &[crate::Vertex], v: crate::Vertex) -> usize {
        order.iter().position(|&x| x == v).expect("vertex in order")
    }

    #[test]
    fn chain_sorts_in_edge_order() {
        let mut g: LineageGraph<char> = LineageGraph::default();
        let a = g.add_vertex('A');
        let b = g.add_vertex('B');
        let c = g.add_vertex('C');
        g.add_edge(a, b).expect("a->b");
        g.add_edge(b, c).expect("b->c");

        assert_eq!(g.topological_sort().expect("acyclic"), vec![a, b, c]);
    }

    #[test]
    fn edges_inserted_backwards_still_sort() {
        let mut g: LineageGraph<char> = LineageGraph::default();
        let c = g.add_vertex('C');
        let b = g.add_vertex('B');
        let a = g.add_vertex('A');
        g.add_edge(b, c).expect("b->c");
        g.add_edge(a, b).expect("a->b");

        let order = g.topological_sort().expect("acyclic");
        assert!(position(&order, a) < position(&order, b));
        assert!(position(&order, b) < position(&order, c));
    }

    #[test]
    fn cycle_is_reported() {
        let mut g: LineageGraph<char> = LineageGraph::default();
        let a = g.add_vertex('A');
        let b = g.add_vertex('B');
        g.add_edge(a, b).expect("a->b");
        g.add_edge(b, a).expect("b->a");

        let err = g.topological_sort().expect_err("cyclic");
        assert_eq!(err.code(), ErrorCode::CycleDetected);
    }

    #[test]
    fn empty_graph_sorts_to_empty() {
        let g: LineageGraph<char> = LineageGraph::default();
        assert!(g.topological_sort().expect("empty").is_empty());
    }
}
