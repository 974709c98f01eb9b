//! The forecast CLI commands.
use super::{reports::records as reports, write_report, ReportArgs, Session};
use crate::cli;
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use forecast_lib::prelude::WeatherRecord;
use std::path::PathBuf;

mod activities;
mod best;
mod current;
mod daily;
mod day;
mod hourly;

#[derive(Debug)]
pub struct Commands;
impl Commands {
    /// Return the collection of commands.
    pub fn get() -> Vec<Command> {
        vec![
            current::command(),
            hourly::command(),
            daily::command(),
            day::command(),
            best::command(),
            activities::command(),
        ]
    }
    /// Run the associated command.
    ///
    /// # Arguments
    ///
    /// - `session` holds the configuration and forecast normalizer.
    /// - `name` identifies the command that will be run.
    /// - `args` holds the associated command arguments.
    pub fn run(session: &Session, name: &str, args: ArgMatches) -> cli::Result<()> {
        match name {
            current::COMMAND_NAME => current::execute(session, args),
            hourly::COMMAND_NAME => hourly::execute(session, args),
            daily::COMMAND_NAME => daily::execute(session, args),
            day::COMMAND_NAME => day::execute(session, args),
            best::COMMAND_NAME => best::execute(session, args),
            activities::COMMAND_NAME => activities::execute(session, args),
            _ => cli::err!("'{}' is not a known command.", name),
        }
    }
}

/// The provider payload file argument id.
const PAYLOAD: &str = "PAYLOAD";

/// The provider payload file argument.
fn payload_arg() -> Arg {
    Arg::new(PAYLOAD)
        .value_name("FILE")
        .action(ArgAction::Set)
        .required(true)
        .value_parser(cli::parse_existing_file)
        .help("The weather provider forecast JSON file.")
}

/// Read the provider payload named on the command line.
///
/// # Arguments
///
/// * `args` holds the command arguments.
///
fn payload(args: &ArgMatches) -> cli::Result<String> {
    match args.get_one::<PathBuf>(PAYLOAD) {
        Some(path) => cli::read_payload(path),
        None => cli::err!("The forecast file is required."),
    }
}

/// Parse an argument turning it into a [NaiveDate].
///
/// # Arguments
///
/// * `date` is the argument that will be parsed.
fn date_parser(date: &str) -> Result<NaiveDate, String> {
    match toolslib::date_time::parse_date(date) {
        Ok(date) => Ok(date),
        Err(err) => Err(err.to_string()),
    }
}

/// Write weather records using the report type selected on the command line.
///
/// # Arguments
///
/// * `records` are the weather records being reported.
/// * `args` holds the command arguments.
/// * `title` is shown above text reports.
///
fn report_records(records: &[WeatherRecord], args: &ArgMatches, title: Option<String>) -> cli::Result<()> {
    let report_args = ReportArgs::new(args);
    let report = if report_args.csv() {
        reports::csv::Report.generate(records)
    } else if report_args.json() {
        let report = match report_args.pretty() {
            true => reports::json::Report::pretty_printed(),
            false => reports::json::Report::default(),
        };
        report.generate(records)
    } else {
        let report = reports::text::Report::default().with_title_separator();
        match title {
            Some(title) => report.with_title(title).generate(records),
            None => report.generate(records),
        }
    };
    write_report(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use toolslib::date_time::get_date;

    /// The forecast fixture shared with the library.
    pub const FORECAST: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../lib/resources/tests/forecast.json");

    #[test]
    fn commands() {
        let names = Commands::get().iter().map(|command| command.get_name().to_string()).collect::<Vec<_>>();
        assert_eq!(names, vec!["current", "hourly", "daily", "day", "best", "activities"]);
    }

    #[test]
    fn dates() {
        assert_eq!(date_parser("2024-06-03").unwrap(), get_date(2024, 6, 3));
        assert_eq!(date_parser("6/3/2024").unwrap(), get_date(2024, 6, 3));
        assert!(date_parser("June third").is_err());
    }

    #[test]
    fn payload_file() {
        let mut cmd = Command::new("test").no_binary_name(true).arg(payload_arg());
        let args = cmd.try_get_matches_from_mut([FORECAST]).unwrap();
        assert!(payload(&args).unwrap().contains("\"list\""));
        assert!(cmd.try_get_matches_from_mut(["no-such-forecast.json"]).is_err());
        assert!(cmd.try_get_matches_from_mut(Vec::<&str>::new()).is_err());
    }
}
