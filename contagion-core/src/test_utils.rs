//! Shared test utilities for `contagion-core`.

use contagion_test_support::profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{AdjacencyGraph, GraphStore, SpreadNetwork};

/// Builds a proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a network with `slots` node slots whose edges are stored in both
/// directions at weight `1.00`. Every edge endpoint is active.
#[must_use]
pub(crate) fn undirected_network(slots: usize, edges: &[(usize, usize)]) -> SpreadNetwork {
    let mut graph = AdjacencyGraph::with_capacity(slots);
    for &(a, b) in edges {
        graph.add_edge(a, b, 100);
        graph.add_edge(b, a, 100);
    }
    let active: Vec<usize> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
    SpreadNetwork::from_parts("fixture", graph, 1.0, active)
}
