//! Command implementations and argument parsing for the contagion CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use contagion_core::{
    GraphStore, NetworkBuilder, NetworkError, QueryError, RemovalCriterion, SpreadNetwork,
    legacy_generations,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::summary::{ExecutionSummary, NetworkStats, Report};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "contagion",
    about = "Analyse how an infection spreads over a weighted contact network."
)]
pub struct Cli {
    /// Dataset selection and filtering.
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct DatasetArgs {
    /// Edge-list file with a `<nodes> <edges>` header.
    #[arg(long, short = 'd')]
    pub dataset: PathBuf,

    /// Transmissibility threshold; edges lighter than this are dropped.
    #[arg(long, short = 't', default_value_t = 0.0)]
    pub tau: f64,

    /// Override name for the dataset (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Summarise the filtered network.
    Stats,
    /// List the neighbours of a node.
    Neighbors {
        /// Node id.
        node: usize,
    },
    /// Trace the weighted path between two nodes.
    Path {
        /// Start node.
        source: usize,
        /// End node.
        destination: usize,
    },
    /// Report the degree of a node.
    Degree {
        /// Node id.
        node: usize,
    },
    /// List the active nodes with an exact degree.
    DegreeNodes {
        /// Degree to match.
        degree: usize,
    },
    /// Report the clustering coefficient of a node.
    ClustCoeff {
        /// Node id.
        node: usize,
    },
    /// List the active nodes whose clustering coefficient lies in a range.
    ClustNodes {
        /// Inclusive lower bound, truncated to two decimals.
        low: f64,
        /// Inclusive upper bound, truncated to two decimals.
        high: f64,
    },
    /// List high-degree, low-clustering nodes.
    HighDegLowCc(HighDegLowCcArgs),
    /// Count generations until a population fraction is reached.
    Generations(GenerationsArgs),
    /// Estimate the basic reproduction number.
    RNumber {
        /// Optional removal applied before averaging.
        #[command(subcommand)]
        removal: Option<Removal>,
    },
}

/// Degree floor and clustering ceiling.
#[derive(Debug, Args, Clone, Copy)]
pub struct HighDegLowCcArgs {
    /// Minimum degree, inclusive.
    pub low_bound_degree: usize,
    /// Maximum truncated clustering coefficient, inclusive.
    pub up_bound_cc: f64,
}

/// Options accepted by the `generations` command.
#[derive(Debug, Args, Clone)]
pub struct GenerationsArgs {
    /// Seed node.
    pub seed: usize,

    /// Population fraction to reach, in `[0, 1]`.
    pub threshold: f64,

    /// Print `-1` instead of failing when no level count exists.
    #[arg(long)]
    pub legacy: bool,

    /// Optional removal applied before counting.
    #[command(subcommand)]
    pub removal: Option<Removal>,
}

/// Node removal applied before a generations or reproduction query.
#[derive(Debug, Subcommand, Clone, Copy)]
pub enum Removal {
    /// Remove nodes with an exact degree.
    RemoveDegree {
        /// Degree to match.
        degree: usize,
    },
    /// Remove nodes whose clustering coefficient lies in a range.
    RemoveCc {
        /// Inclusive lower bound.
        low: f64,
        /// Inclusive upper bound.
        high: f64,
    },
    /// Remove high-degree, low-clustering nodes.
    RemoveHighDegLowCc(HighDegLowCcArgs),
}

impl Removal {
    fn criterion(self) -> RemovalCriterion {
        match self {
            Self::RemoveDegree { degree } => RemovalCriterion::Degree(degree),
            Self::RemoveCc { low, high } => RemovalCriterion::ClusteringRange { low, high },
            Self::RemoveHighDegLowCc(args) => RemovalCriterion::HighDegreeLowClustering {
                low_bound_degree: args.low_bound_degree,
                up_bound_cc: args.up_bound_cc,
            },
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or configuring the network failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// A structural query was rejected.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading fails or the query is rejected.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use contagion_cli::cli::{Cli, Command, DatasetArgs, Report, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "3 2\n1 2 0.9\n2 3 0.9\n")?;
/// let cli = Cli {
///     dataset: DatasetArgs {
///         dataset: file.path().to_path_buf(),
///         tau: 0.8,
///         name: Some("triad".into()),
///     },
///     command: Command::Neighbors { node: 2 },
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.dataset, "triad");
/// assert!(matches!(summary.report, Report::Nodes { ref nodes, .. } if nodes == &[1, 3]));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, tau = cli.dataset.tau),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    Span::current().record("command", field::display(command_label(&cli.command)));
    let mut network = load_network(&cli.dataset)?;
    let report = run_command(&mut network, cli.command)?;
    info!(dataset = network.name(), "command completed");
    Ok(ExecutionSummary {
        dataset: network.name().to_owned(),
        report,
    })
}

#[instrument(name = "cli.load", err, skip(args), fields(path = %args.dataset.display()))]
pub(super) fn load_network(args: &DatasetArgs) -> Result<SpreadNetwork, CliError> {
    let mut builder = NetworkBuilder::new().with_transmissibility(args.tau);
    if let Some(name) = &args.name {
        builder = builder.with_name(name.clone());
    }
    Ok(builder.load_path(&args.dataset)?)
}

pub(super) fn run_command(
    network: &mut SpreadNetwork,
    command: Command,
) -> Result<Report, CliError> {
    let report = match command {
        Command::Stats => Report::Stats(stats(network)),
        Command::Neighbors { node } => Report::Nodes {
            label: "neighbors",
            nodes: network.neighbors(node),
        },
        Command::Path {
            source,
            destination,
        } => Report::Nodes {
            label: "path",
            nodes: network.path(source, destination)?,
        },
        Command::Degree { node } => Report::Degree {
            node,
            degree: network.degree(node),
        },
        Command::DegreeNodes { degree } => Report::Nodes {
            label: "nodes",
            nodes: network.degree_nodes(degree),
        },
        Command::ClustCoeff { node } => Report::Coefficient {
            node,
            value: network.clust_coeff(node)?,
        },
        Command::ClustNodes { low, high } => Report::Nodes {
            label: "nodes",
            nodes: network.clust_coeff_nodes(low, high),
        },
        Command::HighDegLowCc(args) => Report::Nodes {
            label: "nodes",
            nodes: network.high_deg_low_cc_nodes(args.low_bound_degree, args.up_bound_cc),
        },
        Command::Generations(args) => generations(network, &args)?,
        Command::RNumber { removal } => Report::RNumber {
            value: r_number(network, removal),
        },
    };
    Ok(report)
}

fn stats(network: &SpreadNetwork) -> NetworkStats {
    NetworkStats {
        node_slots: network.node_slots(),
        entries: network.entry_count(),
        active_nodes: network.active_nodes().len(),
        edges: network.graph().edge_count() / 2,
        rejected_records: network.load_report().rejected(),
        avg_degree: network.avg_degree(),
        r_number: network.r_number(),
    }
}

fn generations(network: &mut SpreadNetwork, args: &GenerationsArgs) -> Result<Report, CliError> {
    let (seed, threshold) = (args.seed, args.threshold);
    let result = match args.removal.map(Removal::criterion) {
        None => network.generations(seed, threshold),
        Some(RemovalCriterion::Degree(degree)) => {
            network.generations_degree(seed, threshold, degree)
        }
        Some(RemovalCriterion::ClusteringRange { low, high }) => {
            network.generations_cc(seed, threshold, low, high)
        }
        Some(RemovalCriterion::HighDegreeLowClustering {
            low_bound_degree,
            up_bound_cc,
        }) => network.generations_high_deg_low_cc(seed, threshold, low_bound_degree, up_bound_cc),
    };
    if args.legacy {
        return Ok(Report::Generations {
            seed,
            level: legacy_generations(&result),
        });
    }
    let level = result?;
    Ok(Report::Generations {
        seed,
        level: i64::try_from(level).unwrap_or(i64::MAX),
    })
}

fn r_number(network: &mut SpreadNetwork, removal: Option<Removal>) -> f64 {
    match removal.map(Removal::criterion) {
        None => network.r_number(),
        Some(RemovalCriterion::Degree(degree)) => network.r_number_degree(degree),
        Some(RemovalCriterion::ClusteringRange { low, high }) => network.r_number_cc(low, high),
        Some(RemovalCriterion::HighDegreeLowClustering {
            low_bound_degree,
            up_bound_cc,
        }) => network.r_number_deg_cc(low_bound_degree, up_bound_cc),
    }
}

pub(super) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Stats => "stats",
        Command::Neighbors { .. } => "neighbors",
        Command::Path { .. } => "path",
        Command::Degree { .. } => "degree",
        Command::DegreeNodes { .. } => "degree-nodes",
        Command::ClustCoeff { .. } => "clust-coeff",
        Command::ClustNodes { .. } => "clust-nodes",
        Command::HighDegLowCc(_) => "high-deg-low-cc",
        Command::Generations(_) => "generations",
        Command::RNumber { .. } => "r-number",
    }
}
