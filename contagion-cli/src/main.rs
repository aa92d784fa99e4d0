//! CLI entry point for contagion analyses.
//!
//! Parses arguments with clap, runs one query against the filtered network,
//! renders the summary to stdout and maps failures to a non-zero exit code.
//! Logging is initialised first so loading and querying emit diagnostics.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use contagion_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, load_code) = match err.downcast_ref::<CliError>() {
            Some(CliError::Network(network)) => (
                Some(network.code().as_str()),
                network.load_code().map(|code| code.as_str()),
            ),
            Some(CliError::Query(query)) => (Some(query.code().as_str()), None),
            None => (None, None),
        };

        error!(
            error = %format!("{err:#}"),
            code = code.map(field::display),
            load_code = load_code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
