//! Degree statistics over the active node set.

use crate::{network::SpreadNetwork, store::GraphStore};

impl<G: GraphStore> SpreadNetwork<G> {
    /// Returns the number of neighbours of `node`.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::NetworkBuilder;
    ///
    /// let network = NetworkBuilder::new()
    ///     .load_reader(Cursor::new("3 2\n1 2 0.9\n2 3 0.9\n"))?;
    /// assert_eq!(network.degree(1), 1);
    /// assert_eq!(network.degree(2), 2);
    /// # Ok::<(), contagion_core::NetworkError>(())
    /// ```
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Returns the active nodes whose degree equals `degree`, in ascending id
    /// order.
    #[must_use]
    pub fn degree_nodes(&self, degree: usize) -> Vec<usize> {
        self.active_nodes()
            .iter()
            .copied()
            .filter(|&node| self.degree(node) == degree)
            .collect()
    }
}
