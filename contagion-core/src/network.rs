//! The loaded contact network and its neighbour queries.
//!
//! [`SpreadNetwork`] owns the threshold-filtered graph, the transmissibility
//! used to build it and the set of active nodes. Every analysis in this crate
//! is an inherent method on it. Removal variants mutate the graph in place, so
//! callers clone the network before running independent what-if scenarios.

use std::{collections::BTreeSet, sync::Arc};

use crate::{
    loader::{LoadReport, LoadedDataset},
    store::{AdjacencyGraph, GraphStore},
};

/// Reserved slot id; never a real node.
pub(crate) const SENTINEL: usize = 0;

/// Threshold-filtered contact network.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use contagion_core::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .with_transmissibility(0.8)
///     .load_reader(Cursor::new("3 2\n1 2 0.9\n2 3 0.9\n"))?;
/// assert_eq!(network.neighbors(2), vec![1, 3]);
/// assert_eq!(network.active_nodes().len(), 3);
/// # Ok::<(), contagion_core::NetworkError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SpreadNetwork<G = AdjacencyGraph> {
    name: Arc<str>,
    graph: G,
    transmissibility: f64,
    active: BTreeSet<usize>,
    report: LoadReport,
}

impl SpreadNetwork<AdjacencyGraph> {
    pub(crate) fn from_loaded(name: Arc<str>, loaded: LoadedDataset, transmissibility: f64) -> Self {
        Self {
            name,
            graph: loaded.graph,
            transmissibility,
            active: loaded.active,
            report: loaded.report,
        }
    }
}

impl<G: GraphStore> SpreadNetwork<G> {
    /// Wraps an externally populated store.
    ///
    /// `active` lists the nodes the statistics iterate over. The load report
    /// is left at its default, so [`Self::entry_count`] reports `1`.
    ///
    /// # Examples
    /// ```
    /// use contagion_core::{AdjacencyGraph, GraphStore, SpreadNetwork};
    ///
    /// let mut graph = AdjacencyGraph::with_capacity(3);
    /// graph.add_edge(1, 2, 50);
    /// graph.add_edge(2, 1, 50);
    /// let network = SpreadNetwork::from_parts("manual", graph, 0.5, [1, 2]);
    /// assert_eq!(network.degree(1), 1);
    /// ```
    #[must_use]
    pub fn from_parts(
        name: &str,
        graph: G,
        transmissibility: f64,
        active: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            name: Arc::from(name),
            graph,
            transmissibility,
            active: active.into_iter().collect(),
            report: LoadReport::default(),
        }
    }

    /// Returns the dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the transmissibility threshold τ fixed at load time.
    #[must_use]
    pub fn transmissibility(&self) -> f64 {
        self.transmissibility
    }

    /// Returns the underlying graph store.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// Returns the nodes that were endpoints of a surviving edge at load time.
    ///
    /// The set is not recomputed after removals.
    #[must_use]
    pub fn active_nodes(&self) -> &BTreeSet<usize> {
        &self.active
    }

    /// Returns the bookkeeping gathered while loading.
    #[must_use]
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Returns `1` plus the number of accepted edge records.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.report.entry_count()
    }

    /// Returns the number of node slots, including the reserved slot.
    #[must_use]
    pub fn node_slots(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns whether `node` lies in `[1, node_slots())`.
    #[must_use]
    pub fn contains_node(&self, node: usize) -> bool {
        node != SENTINEL && node < self.graph.node_count()
    }

    /// Population size used by the spread fraction and average degree:
    /// node slots minus the reserved slot.
    pub(crate) fn population(&self) -> usize {
        self.graph.node_count().saturating_sub(1)
    }

    /// Returns the ids linked to `id` by an edge in either direction.
    ///
    /// If `id` touches the reserved slot `0` in either direction the whole
    /// result is discarded and an empty list is returned.
    #[must_use]
    pub fn neighbors(&self, id: usize) -> Vec<usize> {
        if self.graph.has_edge(id, SENTINEL) || self.graph.has_edge(SENTINEL, id) {
            return Vec::new();
        }
        (1..self.graph.node_count())
            .filter(|&other| self.graph.has_edge(id, other) || self.graph.has_edge(other, id))
            .collect()
    }
}
