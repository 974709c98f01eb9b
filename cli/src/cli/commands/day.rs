//! The single day forecast command.
use super::{date_parser, payload, payload_arg, report_records, ReportArgs};
use crate::cli::{self, Session};
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use forecast_lib::prelude::records_on;
use toolslib::date_time::isodate;

/// The day command name.
pub const COMMAND_NAME: &str = "day";

/// The date argument id.
const DATE: &str = "DATE";

/// Create the day command.
pub fn command() -> Command {
    Command::new(COMMAND_NAME)
        .about("Show the daily and 3 hour forecast for a date.")
        .args(ReportArgs::get())
        .group(ReportArgs::arg_group())
        .arg(payload_arg())
        .arg(
            Arg::new(DATE)
                .value_name("DATE")
                .action(ArgAction::Set)
                .required(true)
                .value_parser(date_parser)
                .help("The forecast date (YYYY-MM-DD)."),
        )
}

/// Executes the day command.
///
/// Text reports show the daily record and hourly records in separate tables, the other
/// reports list the daily record ahead of the hourly records.
///
/// # Arguments
///
/// * `session` holds the configuration and forecast normalizer.
/// * `args` contains the day command arguments.
///
pub fn execute(session: &Session, args: ArgMatches) -> cli::Result<()> {
    let date = match args.get_one::<NaiveDate>(DATE) {
        Some(date) => *date,
        None => return cli::err!("The forecast date is required."),
    };
    let payload = payload(&args)?;
    let daily = records_on(&session.normalizer.daily(&payload)?, &date);
    let hourly = records_on(&session.normalizer.hourly_slots_of(&payload, usize::MAX)?, &date);
    if daily.is_empty() && hourly.is_empty() {
        return cli::err!("{} is not in the forecast.", isodate(&date));
    }
    match ReportArgs::new(&args).text() {
        true => {
            report_records(&daily, &args, Some(format!("Daily forecast for {}", isodate(&date))))?;
            report_records(&hourly, &args, Some(format!("\nHourly forecast for {}", isodate(&date))))
        }
        false => {
            let records = daily.into_iter().chain(hourly).collect::<Vec<_>>();
            report_records(&records, &args, None)
        }
    }
}
