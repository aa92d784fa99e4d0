//! Command results and their plain-text rendering.

use std::io::{self, Write};

/// Outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Name of the loaded dataset.
    pub dataset: String,
    /// Command-specific payload.
    pub report: Report,
}

/// Whole-network statistics printed by `stats`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkStats {
    /// Node slots including the reserved slot.
    pub node_slots: usize,
    /// One plus the number of accepted edge records.
    pub entries: usize,
    /// Nodes that appear in a surviving edge.
    pub active_nodes: usize,
    /// Undirected edges currently stored.
    pub edges: usize,
    /// Records dropped by the transmissibility filter.
    pub rejected_records: usize,
    /// Average degree over the population.
    pub avg_degree: f64,
    /// Basic reproduction number.
    pub r_number: f64,
}

/// Command-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Network statistics.
    Stats(NetworkStats),
    /// A list of node ids under a label such as `path` or `neighbors`.
    Nodes {
        /// Heading printed before the ids.
        label: &'static str,
        /// Node ids in query order.
        nodes: Vec<usize>,
    },
    /// Degree of one node.
    Degree {
        /// Queried node.
        node: usize,
        /// Number of neighbours.
        degree: usize,
    },
    /// Clustering coefficient of one node.
    Coefficient {
        /// Queried node.
        node: usize,
        /// Coefficient in `[0, 1]`.
        value: f64,
    },
    /// Generation count; `-1` only appears in legacy mode.
    Generations {
        /// Seed node.
        seed: usize,
        /// Wavefront count.
        level: i64,
    },
    /// Reproduction number after any requested removal.
    RNumber {
        /// Estimated `R0`.
        value: f64,
    },
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use contagion_cli::cli::{ExecutionSummary, Report, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     dataset: "demo".into(),
///     report: Report::Nodes { label: "path", nodes: vec![1, 4, 2] },
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "dataset: demo\npath: 1 4 2\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "dataset: {}", summary.dataset)?;
    match &summary.report {
        Report::Stats(stats) => {
            writeln!(writer, "node slots: {}", stats.node_slots)?;
            writeln!(writer, "entries: {}", stats.entries)?;
            writeln!(writer, "active nodes: {}", stats.active_nodes)?;
            writeln!(writer, "edges: {}", stats.edges)?;
            writeln!(writer, "rejected records: {}", stats.rejected_records)?;
            writeln!(writer, "average degree: {:.4}", stats.avg_degree)?;
            writeln!(writer, "r number: {:.4}", stats.r_number)?;
        }
        Report::Nodes { label, nodes } => {
            let joined: Vec<String> = nodes.iter().map(ToString::to_string).collect();
            writeln!(writer, "{label}: {}", joined.join(" "))?;
        }
        Report::Degree { node, degree } => writeln!(writer, "degree({node}): {degree}")?,
        Report::Coefficient { node, value } => {
            writeln!(writer, "clustering({node}): {value:.4}")?;
        }
        Report::Generations { seed, level } => writeln!(writer, "generations({seed}): {level}")?,
        Report::RNumber { value } => writeln!(writer, "r number: {value:.4}")?,
    }
    Ok(())
}
