//! Basic reproduction number estimates.
//!
//! `R0` is the transmissibility times the average degree. The removal
//! variants cut every edge incident to the selected nodes before averaging.

use crate::{network::SpreadNetwork, removal::RemovalCriterion, store::GraphStore};

impl<G: GraphStore> SpreadNetwork<G> {
    /// Sums the degree of every active node and divides by the population.
    ///
    /// The population counts every real slot, so isolated slots lower the
    /// average. An empty population averages to `0.0`.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::NetworkBuilder;
    ///
    /// let network = NetworkBuilder::new()
    ///     .with_transmissibility(0.8)
    ///     .load_reader(Cursor::new("3 2\n1 2 0.9\n2 3 0.9\n"))?;
    /// assert!((network.avg_degree() - 4.0 / 3.0).abs() < 1e-12);
    /// # Ok::<(), contagion_core::NetworkError>(())
    /// ```
    #[must_use]
    pub fn avg_degree(&self) -> f64 {
        let population = self.population();
        if population == 0 {
            return 0.0;
        }
        let total: usize = self
            .active_nodes()
            .iter()
            .map(|&node| self.degree(node))
            .sum();
        total as f64 / population as f64
    }

    /// Returns `transmissibility * avg_degree()`.
    #[must_use]
    pub fn r_number(&self) -> f64 {
        self.transmissibility() * self.avg_degree()
    }

    /// Cuts every edge of the nodes with the given degree, then returns
    /// [`Self::r_number`].
    pub fn r_number_degree(&mut self, degree: usize) -> f64 {
        self.r_number_after_removal(RemovalCriterion::Degree(degree))
    }

    /// Cuts every edge of the nodes whose truncated clustering coefficient
    /// lies in `[low, high]`, then returns [`Self::r_number`].
    pub fn r_number_cc(&mut self, low: f64, high: f64) -> f64 {
        self.r_number_after_removal(RemovalCriterion::ClusteringRange { low, high })
    }

    /// Cuts every edge of the high-degree, low-clustering nodes, then returns
    /// [`Self::r_number`].
    pub fn r_number_deg_cc(&mut self, low_bound_degree: usize, up_bound_cc: f64) -> f64 {
        self.r_number_after_removal(RemovalCriterion::HighDegreeLowClustering {
            low_bound_degree,
            up_bound_cc,
        })
    }

    fn r_number_after_removal(&mut self, criterion: RemovalCriterion) -> f64 {
        let selection = self.select(criterion);
        self.remove_edges(&selection, criterion.reproduction_rule());
        self.r_number()
    }
}
