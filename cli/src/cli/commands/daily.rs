//! The daily forecast command.
use super::{payload, payload_arg, report_records, ReportArgs};
use crate::cli::{self, Session};
use clap::{ArgMatches, Command};

/// The daily forecast command name.
pub const COMMAND_NAME: &str = "daily";

/// Create the daily forecast command.
pub fn command() -> Command {
    Command::new(COMMAND_NAME)
        .about("Show the weather for each day of the forecast.")
        .args(ReportArgs::get())
        .group(ReportArgs::arg_group())
        .arg(payload_arg())
}

/// Executes the daily forecast command.
///
/// # Arguments
///
/// * `session` holds the configuration and forecast normalizer.
/// * `args` contains the daily command arguments.
///
pub fn execute(session: &Session, args: ArgMatches) -> cli::Result<()> {
    let records = session.normalizer.daily(&payload(&args)?)?;
    report_records(&records, &args, None)
}
