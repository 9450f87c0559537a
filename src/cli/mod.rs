// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, RunnerKind, StoreKind};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing values, or the --help
/// flag), clap displays its message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
