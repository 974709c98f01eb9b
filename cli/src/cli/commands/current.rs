//! The current conditions command.
use super::{payload, payload_arg, report_records, ReportArgs};
use crate::cli::{self, Session};
use clap::{ArgMatches, Command};

/// The current conditions command name.
pub const COMMAND_NAME: &str = "current";

/// Create the current conditions command.
pub fn command() -> Command {
    Command::new(COMMAND_NAME)
        .about("Show the current conditions from a provider payload.")
        .args(ReportArgs::get())
        .group(ReportArgs::arg_group())
        .arg(payload_arg())
}

/// Executes the current conditions command.
///
/// # Arguments
///
/// * `session` holds the configuration and forecast normalizer.
/// * `args` contains the current command arguments.
///
pub fn execute(session: &Session, args: ArgMatches) -> cli::Result<()> {
    let record = session.normalizer.current(&payload(&args)?)?;
    report_records(&[record], &args, None)
}
