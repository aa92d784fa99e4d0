//! Command-line interface orchestration for contagion analyses.
//!
//! Every command loads one dataset, applies the transmissibility filter and
//! runs a single structural query against the resulting network.

mod commands;
mod summary;

pub use commands::{
    Cli, CliError, Command, DatasetArgs, GenerationsArgs, HighDegLowCcArgs, Removal, run_cli,
};
pub use summary::{ExecutionSummary, NetworkStats, Report, render_summary};

#[cfg(test)]
mod test_helpers;
