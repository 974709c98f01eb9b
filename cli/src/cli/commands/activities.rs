//! The activities command.
use super::{write_report, ReportArgs};
use crate::cli::{self, reports::activities as reports, Session};
use clap::{Arg, ArgAction, ArgMatches, Command};
use forecast_lib::prelude::ActivityCatalog;

/// The activities command name.
pub const COMMAND_NAME: &str = "activities";

/// The activity name argument id.
const NAME: &str = "NAME";

/// Create the activities command.
pub fn command() -> Command {
    Command::new(COMMAND_NAME)
        .about("Show the activities and their comfortable weather.")
        .args(ReportArgs::get())
        .group(ReportArgs::arg_group())
        .arg(Arg::new(NAME).value_name("NAME").action(ArgAction::Set).help("Show a single activity."))
}

/// Executes the activities command.
///
/// # Arguments
///
/// * `session` holds the configuration and the activity catalog filename.
/// * `args` contains the activities command arguments.
///
pub fn execute(session: &Session, args: ArgMatches) -> cli::Result<()> {
    let catalog = session.activities()?;
    let catalog = match args.get_one::<String>(NAME) {
        Some(name) => {
            let mut single = ActivityCatalog::empty();
            single.insert(catalog.get(name)?.clone());
            single
        }
        None => catalog,
    };
    let report_args = ReportArgs::new(&args);
    let report = if report_args.csv() {
        reports::csv::Report.generate(&catalog)
    } else if report_args.json() {
        catalog.to_json(report_args.pretty())?
    } else if catalog.is_empty() {
        "There are no activities.".to_string()
    } else if args.get_one::<String>(NAME).is_some() {
        catalog.iter().map(|criteria| reports::text::Report.details(criteria)).collect::<Vec<_>>().join("\n")
    } else {
        reports::text::Report.generate(&catalog)
    };
    write_report(&report)
}
