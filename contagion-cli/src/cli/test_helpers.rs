//! Small helpers shared across CLI tests.

use contagion_test_support::datasets::DatasetDir;

use super::{Cli, CliError, Command, DatasetArgs, run_cli};

/// Dataset file written to a scratch directory that lives as long as the
/// returned guard.
pub(super) struct WrittenDataset {
    pub(super) args: DatasetArgs,
    _dir: DatasetDir,
}

pub(super) fn write_dataset(contents: &str, tau: f64) -> WrittenDataset {
    let dir = match DatasetDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create dataset dir: {err}"),
    };
    let path = match dir.write("contacts.txt", contents) {
        Ok(path) => path,
        Err(err) => panic!("failed to write dataset: {err}"),
    };
    WrittenDataset {
        args: DatasetArgs {
            dataset: path.into_std_path_buf(),
            tau,
            name: None,
        },
        _dir: dir,
    }
}

pub(super) fn cli_for(dataset: &WrittenDataset, command: Command) -> Cli {
    Cli {
        dataset: dataset.args.clone(),
        command,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
