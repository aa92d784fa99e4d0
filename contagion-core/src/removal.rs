//! Structural node removal.
//!
//! Removing a node deletes edges; the node keeps its slot and stays in the
//! active set. Two deletion rules exist and they are not interchangeable:
//! the generation variants for degree and combined selections only cut edges
//! whose endpoints are both selected, while the clustering generation variant
//! and every reproduction-number variant cut all incident edges.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{network::SpreadNetwork, store::GraphStore};

/// Which edges of a selected node are deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalRule {
    /// Delete an edge only when both endpoints are selected.
    BothEndpointsInSet,
    /// Delete every edge incident to a selected node.
    AllIncidentEdges,
}

/// Selection rule that decides which active nodes are removed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RemovalCriterion {
    /// Nodes whose degree equals the given value.
    Degree(usize),
    /// Nodes whose truncated clustering coefficient lies in `[low, high]`.
    ClusteringRange {
        /// Inclusive lower bound.
        low: f64,
        /// Inclusive upper bound.
        high: f64,
    },
    /// Nodes with at least `low_bound_degree` neighbours and a truncated
    /// clustering coefficient no greater than `up_bound_cc`.
    HighDegreeLowClustering {
        /// Inclusive degree floor.
        low_bound_degree: usize,
        /// Inclusive clustering ceiling.
        up_bound_cc: f64,
    },
}

impl RemovalCriterion {
    /// Rule applied by the matching generations variant.
    ///
    /// # Examples
    /// ```
    /// use contagion_core::{RemovalCriterion, RemovalRule};
    ///
    /// assert_eq!(
    ///     RemovalCriterion::Degree(3).generations_rule(),
    ///     RemovalRule::BothEndpointsInSet,
    /// );
    /// assert_eq!(
    ///     RemovalCriterion::ClusteringRange { low: 0.5, high: 1.0 }.generations_rule(),
    ///     RemovalRule::AllIncidentEdges,
    /// );
    /// ```
    #[must_use]
    pub const fn generations_rule(self) -> RemovalRule {
        match self {
            Self::Degree(_) | Self::HighDegreeLowClustering { .. } => {
                RemovalRule::BothEndpointsInSet
            }
            Self::ClusteringRange { .. } => RemovalRule::AllIncidentEdges,
        }
    }

    /// Rule applied by the matching reproduction-number variant.
    #[must_use]
    pub const fn reproduction_rule(self) -> RemovalRule {
        RemovalRule::AllIncidentEdges
    }
}

impl<G: GraphStore> SpreadNetwork<G> {
    /// Evaluates `criterion` against the current graph.
    #[must_use]
    pub fn select(&self, criterion: RemovalCriterion) -> Vec<usize> {
        match criterion {
            RemovalCriterion::Degree(degree) => self.degree_nodes(degree),
            RemovalCriterion::ClusteringRange { low, high } => self.clust_coeff_nodes(low, high),
            RemovalCriterion::HighDegreeLowClustering {
                low_bound_degree,
                up_bound_cc,
            } => self.high_deg_low_cc_nodes(low_bound_degree, up_bound_cc),
        }
    }

    /// Deletes the edges of `selection` according to `rule` and returns the
    /// number of undirected edges removed.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::{NetworkBuilder, RemovalRule};
    ///
    /// let raw = "4 3\n1 2 1\n2 3 1\n3 4 1\n";
    /// let mut both = NetworkBuilder::new().load_reader(Cursor::new(raw))?;
    /// assert_eq!(both.remove_edges(&[2, 3], RemovalRule::BothEndpointsInSet), 1);
    ///
    /// let mut all = NetworkBuilder::new().load_reader(Cursor::new(raw))?;
    /// assert_eq!(all.remove_edges(&[2, 3], RemovalRule::AllIncidentEdges), 3);
    /// # Ok::<(), contagion_core::NetworkError>(())
    /// ```
    #[instrument(
        name = "core.remove",
        skip(self, selection),
        fields(dataset = %self.name(), selected = selection.len(), rule = ?rule),
    )]
    pub fn remove_edges(&mut self, selection: &[usize], rule: RemovalRule) -> usize {
        let members: BTreeSet<usize> = selection.iter().copied().collect();
        let graph = self.graph_mut();
        let mut removed = 0;
        for &node in &members {
            for neighbor in graph.neighbors(node) {
                if rule == RemovalRule::BothEndpointsInSet && !members.contains(&neighbor) {
                    continue;
                }
                let forward = graph.remove_edge(node, neighbor);
                let backward = graph.remove_edge(neighbor, node);
                if forward || backward {
                    removed += 1;
                }
            }
        }
        record_removed(removed);
        debug!(removed, "edges removed");
        removed
    }
}

#[cfg(feature = "metrics")]
fn record_removed(removed: usize) {
    metrics::counter!("contagion_edges_removed").increment(removed as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_removed(_removed: usize) {}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{GraphStore, SpreadNetwork, test_utils::undirected_network};

    use super::{RemovalCriterion, RemovalRule};

    fn square_with_tail() -> SpreadNetwork {
        // 1-2-3-4-1 square with the tail 4-5.
        undirected_network(6, &[(1, 2), (2, 3), (3, 4), (4, 1), (4, 5)])
    }

    #[rstest]
    #[case::both(RemovalRule::BothEndpointsInSet, 1, 8)]
    #[case::all(RemovalRule::AllIncidentEdges, 3, 4)]
    fn rules_differ_on_boundary_edges(
        #[case] rule: RemovalRule,
        #[case] removed: usize,
        #[case] directed_left: usize,
    ) {
        let mut network = square_with_tail();
        assert_eq!(network.remove_edges(&[1, 2], rule), removed);
        assert_eq!(network.graph().edge_count(), directed_left);
        assert!(!network.graph().has_edge(1, 2));
        assert!(!network.graph().has_edge(2, 1));
    }

    #[rstest]
    fn removal_keeps_slots_and_active_set() {
        let mut network = square_with_tail();
        network.remove_edges(&[4], RemovalRule::AllIncidentEdges);
        assert_eq!(network.node_slots(), 6);
        assert!(network.active_nodes().contains(&4));
        assert_eq!(network.degree(4), 0);
        assert_eq!(network.degree(5), 0);
    }

    #[rstest]
    fn empty_selection_removes_nothing() {
        let mut network = square_with_tail();
        assert_eq!(network.remove_edges(&[], RemovalRule::AllIncidentEdges), 0);
        assert_eq!(network.graph().edge_count(), 10);
    }

    #[rstest]
    #[case(RemovalCriterion::Degree(3), vec![4])]
    #[case(RemovalCriterion::Degree(2), vec![1, 2, 3])]
    #[case(RemovalCriterion::ClusteringRange { low: 0.0, high: 0.0 }, vec![1, 2, 3, 4, 5])]
    #[case(
        RemovalCriterion::HighDegreeLowClustering { low_bound_degree: 3, up_bound_cc: 0.0 },
        vec![4],
    )]
    fn select_dispatches_on_criterion(
        #[case] criterion: RemovalCriterion,
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(square_with_tail().select(criterion), expected);
    }

    #[rstest]
    fn reproduction_rule_is_always_all_incident() {
        for criterion in [
            RemovalCriterion::Degree(1),
            RemovalCriterion::ClusteringRange { low: 0.0, high: 1.0 },
            RemovalCriterion::HighDegreeLowClustering {
                low_bound_degree: 1,
                up_bound_cc: 1.0,
            },
        ] {
            assert_eq!(criterion.reproduction_rule(), RemovalRule::AllIncidentEdges);
        }
    }
}
