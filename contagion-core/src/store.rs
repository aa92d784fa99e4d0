//! Weighted graph storage used by the spread analyses.
//!
//! The analyses only depend on the [`GraphStore`] trait. [`AdjacencyGraph`]
//! is the in-memory implementation produced by the dataset loader.

use std::collections::{BTreeMap, TryReserveError};

/// Storage surface required by the structural analyses.
///
/// Node ids are slot indices in `[0, node_count())`. Slot `0` is reserved by
/// the loader and never receives edges from a well-formed dataset. Each store
/// also carries one scratch flag per slot that traversals use as transient
/// visited state.
///
/// # Examples
/// ```
/// use contagion_core::{AdjacencyGraph, GraphStore};
///
/// let mut graph = AdjacencyGraph::with_capacity(4);
/// graph.add_edge(1, 2, 90);
/// graph.add_edge(2, 1, 90);
/// assert!(graph.has_edge(2, 1));
/// assert_eq!(graph.weight(1, 2), Some(90));
/// assert_eq!(graph.neighbors(1), vec![2]);
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub trait GraphStore {
    /// Returns the number of node slots, including the reserved slot `0`.
    fn node_count(&self) -> usize;

    /// Returns the number of directed edge entries.
    fn edge_count(&self) -> usize;

    /// Inserts or overwrites the directed edge `source -> target`.
    ///
    /// Ids outside the slot range are ignored.
    fn add_edge(&mut self, source: usize, target: usize, weight: u32);

    /// Removes the directed edge `source -> target`, returning whether it
    /// existed.
    fn remove_edge(&mut self, source: usize, target: usize) -> bool;

    /// Returns whether the directed edge `source -> target` exists.
    fn has_edge(&self, source: usize, target: usize) -> bool;

    /// Returns the targets of the outgoing edges of `node` in ascending order.
    fn neighbors(&self, node: usize) -> Vec<usize>;

    /// Returns the weight of `source -> target` when the edge exists.
    fn weight(&self, source: usize, target: usize) -> Option<u32>;

    /// Reads the scratch flag of `node`; out-of-range ids read as `false`.
    fn scratch(&self, node: usize) -> bool;

    /// Writes the scratch flag of `node`; out-of-range ids are ignored.
    fn set_scratch(&mut self, node: usize, value: bool);

    /// Clears the scratch flag of every real node slot `[1, node_count())`.
    fn reset_scratch(&mut self) {
        for node in 1..self.node_count() {
            self.set_scratch(node, false);
        }
    }
}

/// Adjacency-map graph with integer weights and per-node scratch flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adjacency: Vec<BTreeMap<usize, u32>>,
    scratch: Vec<bool>,
    edges: usize,
}

impl AdjacencyGraph {
    /// Creates a graph with `capacity` node slots and no edges.
    ///
    /// # Examples
    /// ```
    /// use contagion_core::{AdjacencyGraph, GraphStore};
    ///
    /// let graph = AdjacencyGraph::with_capacity(5);
    /// assert_eq!(graph.node_count(), 5);
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            adjacency: vec![BTreeMap::new(); capacity],
            scratch: vec![false; capacity],
            edges: 0,
        }
    }

    /// Creates a graph with `capacity` node slots, failing instead of
    /// aborting when the slot tables cannot be allocated.
    ///
    /// # Errors
    /// Returns [`TryReserveError`] when `capacity` slots exceed what the
    /// allocator can provide.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut adjacency = Vec::new();
        adjacency.try_reserve_exact(capacity)?;
        adjacency.resize_with(capacity, BTreeMap::new);
        let mut scratch = Vec::new();
        scratch.try_reserve_exact(capacity)?;
        scratch.resize(capacity, false);
        Ok(Self {
            adjacency,
            scratch,
            edges: 0,
        })
    }

    fn in_range(&self, node: usize) -> bool {
        node < self.adjacency.len()
    }
}

impl GraphStore for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges
    }

    fn add_edge(&mut self, source: usize, target: usize, weight: u32) {
        if !self.in_range(target) {
            return;
        }
        let Some(entries) = self.adjacency.get_mut(source) else {
            return;
        };
        if entries.insert(target, weight).is_none() {
            self.edges += 1;
        }
    }

    fn remove_edge(&mut self, source: usize, target: usize) -> bool {
        let removed = self
            .adjacency
            .get_mut(source)
            .and_then(|entries| entries.remove(&target))
            .is_some();
        if removed {
            self.edges -= 1;
        }
        removed
    }

    fn has_edge(&self, source: usize, target: usize) -> bool {
        self.weight(source, target).is_some()
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.adjacency
            .get(node)
            .map(|entries| entries.keys().copied().collect())
            .unwrap_or_default()
    }

    fn weight(&self, source: usize, target: usize) -> Option<u32> {
        self.adjacency
            .get(source)
            .and_then(|entries| entries.get(&target))
            .copied()
    }

    fn scratch(&self, node: usize) -> bool {
        self.scratch.get(node).copied().unwrap_or(false)
    }

    fn set_scratch(&mut self, node: usize, value: bool) {
        if let Some(flag) = self.scratch.get_mut(node) {
            *flag = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn add_edge_overwrites_weight_without_double_counting() {
        let mut graph = AdjacencyGraph::with_capacity(3);
        graph.add_edge(1, 2, 10);
        graph.add_edge(1, 2, 40);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(1, 2), Some(40));
        assert!(!graph.has_edge(2, 1), "edges are directed entries");
    }

    #[rstest]
    #[case::empty(0)]
    #[case::small(4)]
    fn try_with_capacity_matches_with_capacity(#[case] capacity: usize) {
        let graph = AdjacencyGraph::try_with_capacity(capacity).expect("small tables allocate");
        assert_eq!(graph, AdjacencyGraph::with_capacity(capacity));
    }

    #[rstest]
    #[case::address_space(usize::MAX)]
    #[case::byte_overflow(usize::MAX / 8)]
    fn try_with_capacity_rejects_oversized_tables(#[case] capacity: usize) {
        assert!(AdjacencyGraph::try_with_capacity(capacity).is_err());
    }

    #[rstest]
    #[case::source(7, 1)]
    #[case::target(1, 7)]
    fn add_edge_ignores_out_of_range_ids(#[case] source: usize, #[case] target: usize) {
        let mut graph = AdjacencyGraph::with_capacity(3);
        graph.add_edge(source, target, 5);
        assert_eq!(graph.edge_count(), 0);
    }

    #[rstest]
    fn remove_edge_reports_presence() {
        let mut graph = AdjacencyGraph::with_capacity(3);
        graph.add_edge(1, 2, 10);
        assert!(graph.remove_edge(1, 2));
        assert!(!graph.remove_edge(1, 2));
        assert!(!graph.remove_edge(9, 2));
        assert_eq!(graph.edge_count(), 0);
    }

    #[rstest]
    fn neighbors_are_sorted() {
        let mut graph = AdjacencyGraph::with_capacity(6);
        for target in [5, 2, 4] {
            graph.add_edge(1, target, 1);
        }
        assert_eq!(graph.neighbors(1), vec![2, 4, 5]);
        assert!(graph.neighbors(42).is_empty());
    }

    #[rstest]
    fn reset_scratch_leaves_reserved_slot_untouched() {
        let mut graph = AdjacencyGraph::with_capacity(4);
        for node in 0..4 {
            graph.set_scratch(node, true);
        }
        graph.reset_scratch();
        assert!(graph.scratch(0));
        assert!((1..4).all(|node| !graph.scratch(node)));
        assert!(!graph.scratch(99));
    }
}
