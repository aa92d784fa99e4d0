//! Dataset loading and network configuration.
//!
//! Reads `<nodes> <edges>` headed edge lists, drops records whose weight is
//! below the transmissibility threshold and populates an [`AdjacencyGraph`].

use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
};

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    error::{LoadError, NetworkError},
    network::SpreadNetwork,
    store::{AdjacencyGraph, GraphStore},
};

const DEFAULT_DATASET_NAME: &str = "dataset";

/// Bookkeeping gathered while reading a dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Node count declared by the header.
    pub declared_nodes: usize,
    /// Edge count declared by the header.
    pub declared_edges: usize,
    /// Edge records read after the header.
    pub records: usize,
    /// Records whose weight met the transmissibility threshold.
    pub accepted: usize,
}

impl LoadReport {
    /// Returns the loader's entry count: one for the reserved slot plus one
    /// per accepted record.
    ///
    /// This counts accepted records, not distinct nodes.
    ///
    /// # Examples
    /// ```
    /// use contagion_core::LoadReport;
    ///
    /// let report = LoadReport { accepted: 2, ..LoadReport::default() };
    /// assert_eq!(report.entry_count(), 3);
    /// ```
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.accepted + 1
    }

    /// Records dropped by the transmissibility filter.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.records - self.accepted
    }
}

/// Configures and loads [`SpreadNetwork`] instances.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use contagion_core::NetworkBuilder;
///
/// let network = NetworkBuilder::new()
///     .with_transmissibility(0.8)
///     .with_name("triad")
///     .load_reader(Cursor::new("3 2\n1 2 0.9\n2 3 0.9\n"))?;
/// assert_eq!(network.name(), "triad");
/// assert_eq!(network.entry_count(), 3);
/// assert_eq!(network.degree(2), 2);
/// # Ok::<(), contagion_core::NetworkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    transmissibility: f64,
    name: Option<String>,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            transmissibility: 0.0,
            name: None,
        }
    }
}

impl NetworkBuilder {
    /// Creates a builder that keeps every edge (`τ = 0`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the transmissibility threshold τ.
    #[must_use]
    pub fn with_transmissibility(mut self, tau: f64) -> Self {
        self.transmissibility = tau;
        self
    }

    /// Returns the configured transmissibility threshold.
    #[must_use]
    pub fn transmissibility(&self) -> f64 {
        self.transmissibility
    }

    /// Overrides the dataset name reported in diagnostics.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Opens `path` and loads it; the file stem names the dataset unless a
    /// name was configured.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidTransmissibility`] for a negative or
    /// non-finite τ and [`NetworkError::Load`] when the file cannot be opened
    /// or parsed.
    pub fn load_path(self, path: impl AsRef<Path>) -> Result<SpreadNetwork> {
        let path = path.as_ref();
        let name = self.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .map_or_else(|| DEFAULT_DATASET_NAME.to_owned(), ToOwned::to_owned)
        });
        let file = File::open(path).map_err(|source| NetworkError::Load {
            dataset: Arc::from(name.as_str()),
            error: LoadError::Io { source },
        })?;
        self.with_name(name).load_reader(BufReader::new(file))
    }

    /// Loads a dataset from any buffered reader.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidTransmissibility`] for a negative or
    /// non-finite τ and [`NetworkError::Load`] when parsing fails.
    pub fn load_reader<R: BufRead>(self, reader: R) -> Result<SpreadNetwork> {
        let tau = self.transmissibility;
        if !tau.is_finite() || tau < 0.0 {
            return Err(NetworkError::InvalidTransmissibility { got: tau });
        }
        let name: Arc<str> = Arc::from(self.name.as_deref().unwrap_or(DEFAULT_DATASET_NAME));
        let loaded = load_edges(&name, reader, tau).map_err(|error| NetworkError::Load {
            dataset: Arc::clone(&name),
            error,
        })?;
        Ok(SpreadNetwork::from_loaded(name, loaded, tau))
    }
}

/// Graph, active set and report produced by a successful load.
#[derive(Debug)]
pub(crate) struct LoadedDataset {
    pub(crate) graph: AdjacencyGraph,
    pub(crate) active: BTreeSet<usize>,
    pub(crate) report: LoadReport,
}

#[instrument(name = "core.load", err, skip(reader), fields(dataset = %name, tau = tau))]
fn load_edges<R: BufRead>(
    name: &str,
    reader: R,
    tau: f64,
) -> core::result::Result<LoadedDataset, LoadError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    let (header_line, declared_nodes, declared_edges) = loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(LoadError::MissingHeader);
        };
        let line = line?;
        if is_skippable(&line) {
            continue;
        }
        let (nodes, edges) = parse_header(line_no, &line)?;
        break (line_no, nodes, edges);
    };

    let too_large = || LoadError::HeaderTooLarge {
        line: header_line,
        nodes: declared_nodes,
    };
    let slots = declared_nodes.checked_add(1).ok_or_else(too_large)?;
    let mut graph = AdjacencyGraph::try_with_capacity(slots).map_err(|_| too_large())?;
    let mut active = BTreeSet::new();
    let mut report = LoadReport {
        declared_nodes,
        declared_edges,
        ..LoadReport::default()
    };

    for (line_no, line) in lines {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }
        let record = EdgeRecord::parse(line_no, &line, declared_nodes)?;
        report.records += 1;
        if record.weight < tau {
            continue;
        }
        let scaled = scale_weight(record.weight);
        graph.add_edge(record.source, record.target, scaled);
        graph.add_edge(record.target, record.source, scaled);
        active.insert(record.source);
        active.insert(record.target);
        report.accepted += 1;
    }

    if report.records != declared_edges {
        warn!(
            declared = declared_edges,
            read = report.records,
            "edge record count differs from header"
        );
    }
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        active = active.len(),
        accepted = report.accepted,
        rejected = report.rejected(),
        "created graph"
    );

    Ok(LoadedDataset {
        graph,
        active,
        report,
    })
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('%')
}

fn parse_header(line_no: usize, line: &str) -> core::result::Result<(usize, usize), LoadError> {
    let mut fields = line.split_whitespace();
    let malformed = || LoadError::MalformedHeader { line: line_no };
    let nodes = fields
        .next()
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    let edges = fields
        .next()
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    if fields.next().is_some() {
        debug!(line = line_no, "ignoring trailing header fields");
    }
    Ok((nodes, edges))
}

/// Converts a real weight into hundredths, rounding to the nearest integer.
///
/// Float-to-int `as` casts saturate, so oversized weights clamp to `u32::MAX`.
fn scale_weight(weight: f64) -> u32 {
    (weight * 100.0).round() as u32
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeRecord {
    source: usize,
    target: usize,
    weight: f64,
}

impl EdgeRecord {
    fn parse(line_no: usize, line: &str, declared: usize) -> core::result::Result<Self, LoadError> {
        let mut fields = line.split_whitespace();
        let source = parse_node(line_no, fields.next(), declared)?;
        let target = parse_node(line_no, fields.next(), declared)?;
        let weight = fields
            .next()
            .ok_or(LoadError::MalformedRecord {
                line: line_no,
                reason: "missing weight",
            })?
            .parse::<f64>()
            .map_err(|_| LoadError::MalformedRecord {
                line: line_no,
                reason: "weight is not a number",
            })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(LoadError::InvalidWeight {
                line: line_no,
                weight,
            });
        }
        Ok(Self {
            source,
            target,
            weight,
        })
    }
}

fn parse_node(
    line_no: usize,
    raw: Option<&str>,
    declared: usize,
) -> core::result::Result<usize, LoadError> {
    let node = raw
        .ok_or(LoadError::MalformedRecord {
            line: line_no,
            reason: "missing node id",
        })?
        .parse::<usize>()
        .map_err(|_| LoadError::MalformedRecord {
            line: line_no,
            reason: "node id is not an unsigned integer",
        })?;
    if node == 0 {
        return Err(LoadError::ReservedNode { line: line_no });
    }
    if node > declared {
        return Err(LoadError::NodeOutOfRange {
            line: line_no,
            node,
            declared,
        });
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use rstest::rstest;

    fn load(raw: &str, tau: f64) -> core::result::Result<LoadedDataset, LoadError> {
        load_edges("test", Cursor::new(raw), tau)
    }

    #[rstest]
    fn filters_records_below_threshold() {
        let loaded = load("4 3\n1 2 0.9\n2 3 0.5\n3 4 0.8\n", 0.8).expect("load must succeed");
        assert_eq!(loaded.graph.node_count(), 5);
        assert_eq!(loaded.graph.edge_count(), 4);
        assert!(!loaded.graph.has_edge(2, 3));
        assert_eq!(loaded.active.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert_eq!(loaded.report.accepted, 2);
        assert_eq!(loaded.report.rejected(), 1);
        assert_eq!(loaded.report.entry_count(), 3);
    }

    #[rstest]
    fn weight_equal_to_threshold_survives() {
        let loaded = load("2 1\n1 2 0.5\n", 0.5).expect("load must succeed");
        assert_eq!(loaded.graph.weight(1, 2), Some(50));
        assert_eq!(loaded.graph.weight(2, 1), Some(50));
    }

    #[rstest]
    #[case(0.9, 90)]
    #[case(0.556, 56)]
    #[case(0.004, 0)]
    #[case(1.0, 100)]
    fn weights_are_rounded_to_hundredths(#[case] weight: f64, #[case] expected: u32) {
        assert_eq!(scale_weight(weight), expected);
    }

    #[rstest]
    fn skips_blank_and_comment_lines() {
        let raw = "% contact survey\n3 2\n\n1 2 0.9\n% trailing\n2 3 0.9\n\n";
        let loaded = load(raw, 0.0).expect("load must succeed");
        assert_eq!(loaded.report.records, 2);
        assert_eq!(loaded.report.declared_edges, 2);
    }

    #[rstest]
    #[case::empty("", "LOAD_MISSING_HEADER")]
    #[case::header_text("three two\n", "LOAD_MALFORMED_HEADER")]
    #[case::header_short("3\n", "LOAD_MALFORMED_HEADER")]
    #[case::missing_weight("3 1\n1 2\n", "LOAD_MALFORMED_RECORD")]
    #[case::bad_node("3 1\n1 x 0.3\n", "LOAD_MALFORMED_RECORD")]
    #[case::bad_weight("3 1\n1 2 heavy\n", "LOAD_MALFORMED_RECORD")]
    #[case::negative_weight("3 1\n1 2 -0.5\n", "LOAD_INVALID_WEIGHT")]
    #[case::reserved("3 1\n0 2 0.5\n", "LOAD_RESERVED_NODE")]
    #[case::out_of_range("3 1\n1 4 0.5\n", "LOAD_NODE_OUT_OF_RANGE")]
    #[case::slot_overflow("18446744073709551615 0\n", "LOAD_HEADER_TOO_LARGE")]
    #[case::unallocatable("% huge\n4000000000000000000 0\n", "LOAD_HEADER_TOO_LARGE")]
    fn rejects_malformed_input(#[case] raw: &str, #[case] code: &str) {
        let err = load(raw, 0.1).expect_err("malformed input must fail");
        assert_eq!(err.code().as_str(), code);
    }

    #[rstest]
    fn record_count_mismatch_is_not_fatal() {
        let loaded = load("3 5\n1 2 0.9\n", 0.1).expect("mismatch only warns");
        assert_eq!(loaded.report.records, 1);
        assert_eq!(loaded.report.declared_edges, 5);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn builder_rejects_invalid_transmissibility(#[case] tau: f64) {
        let err = NetworkBuilder::new()
            .with_transmissibility(tau)
            .load_reader(Cursor::new("1 0\n"))
            .expect_err("invalid tau must fail");
        assert!(matches!(err, NetworkError::InvalidTransmissibility { .. }));
    }

    #[rstest]
    fn builder_wraps_load_errors_with_dataset_name() {
        let err = NetworkBuilder::new()
            .with_name("broken")
            .load_reader(Cursor::new("2 1\n1 9 0.5\n"))
            .expect_err("out-of-range node must fail");
        match err {
            NetworkError::Load { dataset, error } => {
                assert_eq!(&*dataset, "broken");
                assert!(matches!(error, LoadError::NodeOutOfRange { node: 9, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
