//! Benchmark parameter types.

use std::fmt;

/// Parameters for a contact-network benchmark run.
#[derive(Clone, Debug)]
pub struct NetworkBenchParams {
    /// Number of nodes in the generated network.
    pub node_count: usize,
    /// Number of edge records in the generated network.
    pub edge_count: usize,
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.node_count, self.edge_count)
    }
}
