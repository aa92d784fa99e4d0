//! Weighted path queries.
//!
//! The search visits nodes in breadth-first order and relaxes distances as
//! edges are examined. Nodes are never revisited in distance order, so the
//! result is the true shortest weighted path only when weights are uniform.

use std::collections::VecDeque;

use tracing::instrument;

use crate::{
    error::{QueryError, QueryResult},
    network::SpreadNetwork,
    store::GraphStore,
};

impl<G: GraphStore> SpreadNetwork<G> {
    /// Returns the node sequence from `source` to `destination`, inclusive.
    ///
    /// Ties in relaxed distance favour the most recently examined
    /// predecessor. When `destination` is unreachable the result is just
    /// `[source]`.
    ///
    /// # Errors
    /// Returns [`QueryError::NodeOutOfRange`] when either endpoint lies
    /// outside `[1, node_slots())`, and [`QueryError::PredecessorCycle`] when
    /// zero-weight ties leave a predecessor loop that never reaches the
    /// source.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::NetworkBuilder;
    ///
    /// let mut network = NetworkBuilder::new()
    ///     .load_reader(Cursor::new("4 3\n1 2 0.5\n2 3 0.5\n3 4 0.5\n"))?;
    /// assert_eq!(network.path(1, 4)?, vec![1, 2, 3, 4]);
    /// assert_eq!(network.path(2, 2)?, vec![2]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(name = "core.path", err, skip(self), fields(dataset = %self.name()))]
    pub fn path(&mut self, source: usize, destination: usize) -> QueryResult<Vec<usize>> {
        let slots = self.node_slots();
        for node in [source, destination] {
            if !self.contains_node(node) {
                return Err(QueryError::NodeOutOfRange {
                    node,
                    node_slots: slots,
                });
            }
        }

        let predecessors = self.relax_breadth_first(source);

        let mut path = Vec::new();
        let mut current = destination;
        while current != source {
            let Some(previous) = predecessors.get(current).copied().flatten() else {
                break;
            };
            if path.len() >= slots {
                return Err(QueryError::PredecessorCycle { destination });
            }
            path.push(current);
            current = previous;
        }
        path.push(source);
        path.reverse();
        Ok(path)
    }

    fn relax_breadth_first(&mut self, source: usize) -> Vec<Option<usize>> {
        let slots = self.node_slots();
        let mut distances: Vec<Option<u64>> = vec![None; slots];
        let mut predecessors: Vec<Option<usize>> = vec![None; slots];
        if let Some(distance) = distances.get_mut(source) {
            *distance = Some(0);
        }

        let graph = self.graph_mut();
        graph.reset_scratch();
        graph.set_scratch(source, true);
        let mut queue = VecDeque::from([source]);

        while let Some(current) = queue.pop_front() {
            let Some(base) = distances.get(current).copied().flatten() else {
                continue;
            };
            for neighbor in graph.neighbors(current) {
                if !graph.scratch(neighbor) {
                    queue.push_back(neighbor);
                    graph.set_scratch(neighbor, true);
                }
                let weight = graph.weight(current, neighbor).unwrap_or_default();
                let candidate = base + u64::from(weight);
                let Some(slot) = distances.get_mut(neighbor) else {
                    continue;
                };
                if slot.is_none_or(|known| candidate <= known) {
                    *slot = Some(candidate);
                    if let Some(previous) = predecessors.get_mut(neighbor) {
                        *previous = Some(current);
                    }
                }
            }
        }
        predecessors
    }
}
