//! The best days command.
use super::{payload, payload_arg, report_records, ReportArgs};
use crate::cli::{self, write_report, Session};
use clap::{Arg, ArgAction, ArgMatches, Command};
use forecast_lib::prelude::{find_best_days, ActivityCriteria, BestDays};

/// The best days command name.
pub const COMMAND_NAME: &str = "best";

/// The activity name argument id.
const ACTIVITY: &str = "ACTIVITY";

/// Create the best days command.
pub fn command() -> Command {
    Command::new(COMMAND_NAME)
        .about("Find the forecast days that suit an activity.")
        .args(ReportArgs::get())
        .group(ReportArgs::arg_group())
        .arg(
            Arg::new(ACTIVITY)
                .value_name("ACTIVITY")
                .action(ArgAction::Set)
                .required(true)
                .help("The name of the activity."),
        )
        .arg(payload_arg())
}

/// Executes the best days command.
///
/// # Arguments
///
/// * `session` holds the configuration and forecast normalizer.
/// * `args` contains the best days command arguments.
///
pub fn execute(session: &Session, args: ArgMatches) -> cli::Result<()> {
    let name = match args.get_one::<String>(ACTIVITY) {
        Some(name) => name,
        None => return cli::err!("The activity name is required."),
    };
    // an unknown activity fails before the forecast is read
    let catalog = session.activities()?;
    let criteria = catalog.get(name)?;
    let payload = payload(&args)?;
    let daily = session.normalizer.daily(&payload)?;
    let hourly = session.normalizer.hourly(&payload)?;
    let best_days = find_best_days(&daily, &hourly, criteria, &session.config.ranking_limits());
    log::info!("{} good days for {}", best_days.len(), criteria.name());
    match (best_days.is_empty(), ReportArgs::new(&args).text()) {
        (true, true) => write_report(&format!("There are no good days for {}.", criteria.name())),
        _ => report_records(&best_days.to_records(), &args, Some(title(criteria, &best_days))),
    }
}

/// The title of the best days text report.
fn title(criteria: &ActivityCriteria, best_days: &BestDays) -> String {
    match best_days {
        BestDays::AllDay(_) => format!("Best days for {}", criteria),
        BestDays::TimeWindowed(_) => {
            let [start, end] = criteria.time_range().as_strings();
            format!("Best days for {} between {} and {}, daily averages\n{}", criteria.name(), start, end, criteria)
        }
    }
}
