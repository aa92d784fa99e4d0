//! Property-based checks over generated contact networks.
//!
//! Each case is rendered to edge-list text and loaded through
//! [`NetworkBuilder`], so the loader's filtering and rounding take part in
//! every property.

use std::io::Cursor;

use proptest::{collection::vec, prelude::*};
use test_strategy::Arbitrary;

use crate::{GraphStore, NetworkBuilder, QueryError, SpreadNetwork, test_utils::suite_proptest_config};

/// Shape of the generated contact graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum Topology {
    /// Arbitrary pairs drawn from the raw tuples.
    #[weight(3)]
    Random,
    /// Node 1 linked to every other node.
    #[weight(1)]
    Star,
    /// Consecutive ids linked in a line.
    #[weight(1)]
    Chain,
}

#[derive(Clone, Debug, Arbitrary)]
struct ContactCase {
    topology: Topology,
    #[strategy(2_usize..20)]
    nodes: usize,
    #[strategy(vec((0_usize..64, 0_usize..64, 0_u8..=100), 0..48))]
    pairs: Vec<(usize, usize, u8)>,
    #[strategy(0_u8..=100)]
    tau_percent: u8,
}

impl ContactCase {
    fn weight_at(&self, index: usize) -> u8 {
        match self.pairs.len() {
            0 => 100,
            len => self.pairs.get(index % len).map_or(100, |pair| pair.2),
        }
    }

    fn edges(&self) -> Vec<(usize, usize, u8)> {
        let nodes = self.nodes;
        match self.topology {
            Topology::Random => self
                .pairs
                .iter()
                .map(|&(a, b, weight)| (a % nodes + 1, b % nodes + 1, weight))
                .filter(|&(a, b, _)| a != b)
                .collect(),
            Topology::Star => (2..=nodes)
                .map(|leaf| (1, leaf, self.weight_at(leaf)))
                .collect(),
            Topology::Chain => (1..nodes)
                .map(|source| (source, source + 1, self.weight_at(source)))
                .collect(),
        }
    }

    fn dataset(&self) -> String {
        let edges = self.edges();
        let mut text = format!("{} {}\n", self.nodes, edges.len());
        for (a, b, weight) in edges {
            text.push_str(&format!("{a} {b} {}\n", f64::from(weight) / 100.0));
        }
        text
    }

    fn tau(&self) -> f64 {
        f64::from(self.tau_percent) / 100.0
    }

    fn load(&self) -> SpreadNetwork {
        NetworkBuilder::new()
            .with_transmissibility(self.tau())
            .with_name("property")
            .load_reader(Cursor::new(self.dataset()))
            .expect("generated datasets are well formed")
    }

    fn node(&self, raw: usize) -> usize {
        raw % self.nodes + 1
    }
}

fn max_active_degree(network: &SpreadNetwork) -> Option<usize> {
    network
        .active_nodes()
        .iter()
        .map(|&node| network.degree(node))
        .max()
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn stored_edges_are_symmetric(case in any::<ContactCase>()) {
        let network = case.load();
        let graph = network.graph();
        for u in 0..graph.node_count() {
            for v in 0..graph.node_count() {
                prop_assert_eq!(graph.has_edge(u, v), graph.has_edge(v, u), "{} <-> {}", u, v);
                prop_assert_eq!(graph.weight(u, v), graph.weight(v, u));
            }
        }
    }

    #[test]
    fn degree_counts_neighbours(case in any::<ContactCase>()) {
        let network = case.load();
        for node in 1..network.node_slots() {
            prop_assert_eq!(network.degree(node), network.neighbors(node).len());
        }
    }

    #[test]
    fn stored_weights_meet_the_threshold(case in any::<ContactCase>()) {
        let network = case.load();
        let floor = u32::from(case.tau_percent);
        for node in 1..network.node_slots() {
            for other in network.graph().neighbors(node) {
                let weight = network.graph().weight(node, other).unwrap_or_default();
                prop_assert!(weight >= floor, "{node}->{other} kept weight {weight} below {floor}");
            }
        }
    }

    #[test]
    fn degree_classes_partition_active_nodes(case in any::<ContactCase>()) {
        let network = case.load();
        let max = max_active_degree(&network).unwrap_or_default();
        let classified: usize = (0..=max).map(|degree| network.degree_nodes(degree).len()).sum();
        prop_assert_eq!(classified, network.active_nodes().len());
    }

    #[test]
    fn clustering_coefficients_are_fractions(case in any::<ContactCase>()) {
        let network = case.load();
        for &node in network.active_nodes() {
            let coeff = network.clust_coeff(node).expect("active nodes are in range");
            prop_assert!((0.0..=1.0).contains(&coeff), "node {node} scored {coeff}");
        }
    }

    #[test]
    fn generations_grow_with_threshold(
        case in any::<ContactCase>(),
        raw_seed in 0_usize..64,
        low in 0_u8..=100,
        high in 0_u8..=100,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let seed = case.node(raw_seed);
        let mut network = case.load();
        let strict = network.generations(seed, f64::from(high) / 100.0);
        let loose = network.generations(seed, f64::from(low) / 100.0);
        if let Ok(strict) = strict {
            prop_assert!(matches!(loose, Ok(loose) if loose <= strict));
        }
    }

    #[test]
    fn paths_follow_edges_from_the_source(
        case in any::<ContactCase>(),
        raw_source in 0_usize..64,
        raw_destination in 0_usize..64,
    ) {
        let source = case.node(raw_source);
        let destination = case.node(raw_destination);
        let mut network = case.load();
        let path = match network.path(source, destination) {
            Ok(path) => path,
            Err(QueryError::PredecessorCycle { .. }) => return Ok(()),
            Err(other) => return Err(TestCaseError::fail(other.to_string())),
        };
        prop_assert_eq!(path.first().copied(), Some(source));
        if path.len() > 1 {
            prop_assert_eq!(path.last().copied(), Some(destination));
        }
        for step in path.windows(2) {
            if let [from, to] = step {
                prop_assert!(network.graph().has_edge(*from, *to));
            }
        }
    }

    #[test]
    fn removing_the_top_degree_class_is_idempotent(case in any::<ContactCase>()) {
        let mut network = case.load();
        let Some(max) = max_active_degree(&network) else {
            return Ok(());
        };
        let first = network.r_number_degree(max);
        let second = network.r_number_degree(max);
        prop_assert!((first - second).abs() < 1e-12, "{first} != {second}");
    }
}
