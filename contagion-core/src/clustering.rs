//! Local clustering coefficients and range selections.
//!
//! Range comparisons use [`Hundredths`]: coefficients and bounds are scaled
//! by 100 and floored, so `0.509` and `0.505` both compare as `0.50`.

use crate::{
    error::{QueryError, QueryResult},
    network::SpreadNetwork,
    store::GraphStore,
};

/// A real value truncated to two decimal digits and held as an integer
/// count of hundredths.
///
/// # Examples
/// ```
/// use contagion_core::Hundredths;
///
/// assert_eq!(Hundredths::truncate(0.509).get(), 50);
/// assert_eq!(Hundredths::truncate(0.505), Hundredths::truncate(0.5));
/// assert_eq!(Hundredths::truncate(-0.015).get(), -2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hundredths(i64);

impl Hundredths {
    /// Computes `floor(value * 100)`.
    #[must_use]
    pub fn truncate(value: f64) -> Self {
        Self((value * 100.0).floor() as i64)
    }

    /// Returns the number of hundredths.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> i64 { self.0 }

    /// Returns the truncated value as a real number.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl<G: GraphStore> SpreadNetwork<G> {
    /// Returns the local clustering coefficient of `node`.
    ///
    /// Counts every ordered pair of neighbour-list positions, the diagonal
    /// included, whose endpoints share an edge, and divides by
    /// `degree * (degree - 1)`. Nodes with fewer than two neighbours score `0`.
    ///
    /// # Errors
    /// Returns [`QueryError::NodeOutOfRange`] when `node` lies outside
    /// `[1, node_slots())`.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::NetworkBuilder;
    ///
    /// let network = NetworkBuilder::new()
    ///     .load_reader(Cursor::new("4 4\n1 2 1\n2 3 1\n1 3 1\n3 4 1\n"))?;
    /// assert_eq!(network.clust_coeff(1)?, 1.0);
    /// assert_eq!(network.clust_coeff(4)?, 0.0);
    /// assert!((network.clust_coeff(3)? - 1.0 / 3.0).abs() < 1e-12);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn clust_coeff(&self, node: usize) -> QueryResult<f64> {
        if !self.contains_node(node) {
            return Err(QueryError::NodeOutOfRange {
                node,
                node_slots: self.node_slots(),
            });
        }
        let neighbors = self.neighbors(node);
        let degree = neighbors.len();
        if degree < 2 {
            return Ok(0.0);
        }
        let graph = self.graph();
        let connectedness = neighbors
            .iter()
            .flat_map(|&left| neighbors.iter().map(move |&right| (left, right)))
            .filter(|&(left, right)| graph.has_edge(left, right))
            .count();
        Ok(connectedness as f64 / (degree * (degree - 1)) as f64)
    }

    /// Returns the active nodes whose truncated coefficient lies in
    /// `[truncate(low), truncate(high)]`, in ascending id order.
    #[must_use]
    pub fn clust_coeff_nodes(&self, low: f64, high: f64) -> Vec<usize> {
        let low = Hundredths::truncate(low);
        let high = Hundredths::truncate(high);
        self.active_nodes()
            .iter()
            .copied()
            .filter(|&node| {
                self.clust_coeff(node)
                    .map(Hundredths::truncate)
                    .is_ok_and(|coeff| low <= coeff && coeff <= high)
            })
            .collect()
    }

    /// Returns the active nodes with `degree >= low_bound_degree` whose
    /// truncated coefficient does not exceed `up_bound_cc`.
    #[must_use]
    pub fn high_deg_low_cc_nodes(&self, low_bound_degree: usize, up_bound_cc: f64) -> Vec<usize> {
        self.active_nodes()
            .iter()
            .copied()
            .filter(|&node| self.degree(node) >= low_bound_degree)
            .filter(|&node| {
                self.clust_coeff(node)
                    .map(Hundredths::truncate)
                    .is_ok_and(|coeff| coeff.as_f64() <= up_bound_cc)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use crate::{AdjacencyGraph, GraphStore, QueryError, SpreadNetwork};

    use super::Hundredths;

    /// Hub 1 joined to 2..=5, with the rim path 2-3-4-5.
    ///
    /// Coefficients: 1 -> 0.5, 2 -> 1.0, 3 -> 0.66.., 4 -> 0.66.., 5 -> 1.0.
    #[fixture]
    fn kite() -> SpreadNetwork {
        let mut graph = AdjacencyGraph::with_capacity(7);
        for (a, b) in [(1, 2), (1, 3), (1, 4), (1, 5), (2, 3), (3, 4), (4, 5)] {
            graph.add_edge(a, b, 100);
            graph.add_edge(b, a, 100);
        }
        SpreadNetwork::from_parts("kite", graph, 1.0, 1..=5)
    }

    #[rstest]
    #[case(1, 0.5)]
    #[case(2, 1.0)]
    #[case(3, 2.0 / 3.0)]
    #[case(6, 0.0)]
    fn clust_coeff_matches_hand_computation(
        kite: SpreadNetwork,
        #[case] node: usize,
        #[case] expected: f64,
    ) {
        let coeff = kite.clust_coeff(node).expect("node is in range");
        assert!((coeff - expected).abs() < 1e-12, "node {node}: {coeff}");
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    fn clust_coeff_rejects_out_of_range(kite: SpreadNetwork, #[case] node: usize) {
        let err = kite.clust_coeff(node).expect_err("node is out of range");
        assert!(matches!(err, QueryError::NodeOutOfRange { .. }));
    }

    #[rstest]
    #[case(0.5, 0.5, vec![1])]
    #[case(0.6, 0.7, vec![3, 4])]
    #[case(1.0, 1.0, vec![2, 5])]
    #[case(0.0, 1.0, vec![1, 2, 3, 4, 5])]
    #[case(0.7, 0.9, vec![])]
    fn clust_coeff_nodes_uses_truncated_bounds(
        kite: SpreadNetwork,
        #[case] low: f64,
        #[case] high: f64,
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(kite.clust_coeff_nodes(low, high), expected);
    }

    #[rstest]
    fn truncated_upper_bound_includes_repeating_fraction(kite: SpreadNetwork) {
        // 0.666.. truncates to 0.66, so a 0.66 ceiling still admits nodes 3 and 4.
        assert_eq!(kite.clust_coeff_nodes(0.66, 0.66), vec![3, 4]);
    }

    /// Hub 1 joined to 2..=12 with 28 of the 55 rim pairs linked, so its
    /// coefficient is 28/55, about 0.509.
    #[fixture]
    fn half_linked_hub() -> SpreadNetwork {
        let mut graph = AdjacencyGraph::with_capacity(13);
        let rim = (2..=12_usize).flat_map(|a| (a + 1..=12).map(move |b| (a, b)));
        for (a, b) in (2..=12).map(|b| (1, b)).chain(rim.take(28)) {
            graph.add_edge(a, b, 100);
            graph.add_edge(b, a, 100);
        }
        SpreadNetwork::from_parts("half-linked", graph, 1.0, 1..=12)
    }

    #[rstest]
    #[case::truncated_match(0.50, 0.50, true)]
    #[case::excluded_above(0.51, 1.0, false)]
    #[case::excluded_below(0.0, 0.49, false)]
    fn clust_coeff_nodes_compares_truncated_coefficients(
        half_linked_hub: SpreadNetwork,
        #[case] low: f64,
        #[case] high: f64,
        #[case] selected: bool,
    ) {
        let coeff = half_linked_hub.clust_coeff(1).expect("hub is in range");
        assert!((coeff - 28.0 / 55.0).abs() < 1e-12, "hub scored {coeff}");
        assert_eq!(
            half_linked_hub.clust_coeff_nodes(low, high).contains(&1),
            selected
        );
    }

    #[rstest]
    #[case(3, 0.66, vec![1, 3, 4])]
    #[case(3, 0.65, vec![1])]
    #[case(4, 1.0, vec![1])]
    #[case(5, 1.0, vec![])]
    #[case(0, 0.5, vec![1])]
    fn high_deg_low_cc_nodes_combines_criteria(
        kite: SpreadNetwork,
        #[case] low_bound_degree: usize,
        #[case] up_bound_cc: f64,
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(
            kite.high_deg_low_cc_nodes(low_bound_degree, up_bound_cc),
            expected
        );
    }

    #[rstest]
    #[case(0.509, 50)]
    #[case(0.505, 50)]
    #[case(0.519, 51)]
    #[case(1.0, 100)]
    #[case(0.0, 0)]
    #[case(-1.0, -100)]
    fn hundredths_floor(#[case] value: f64, #[case] expected: i64) {
        assert_eq!(Hundredths::truncate(value).get(), expected);
    }
}
