//! The hourly forecast command.
use super::{payload, payload_arg, report_records, ReportArgs};
use crate::cli::{self, Session};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use forecast_lib::prelude::{group_by_date, DailyAggregate, WeatherRecord};

/// The hourly forecast command name.
pub const COMMAND_NAME: &str = "hourly";

/// The number of slots argument id.
const SLOTS: &str = "SLOTS";

/// The summarize by date argument id.
const BY_DATE: &str = "BY_DATE";

/// Create the hourly forecast command.
pub fn command() -> Command {
    Command::new(COMMAND_NAME)
        .about("Show the 3 hour forecast slots.")
        .args(ReportArgs::get())
        .group(ReportArgs::arg_group())
        .arg(
            Arg::new(SLOTS)
                .short('s')
                .long("slots")
                .value_name("N")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u16).range(1..))
                .help("The number of slots to show (DEFAULT from the configuration)."),
        )
        .arg(
            Arg::new(BY_DATE)
                .long("by-date")
                .action(ArgAction::SetTrue)
                .help("Summarize the slots for each date."),
        )
        .arg(payload_arg())
}

/// Executes the hourly forecast command.
///
/// # Arguments
///
/// * `session` holds the configuration and forecast normalizer.
/// * `args` contains the hourly command arguments.
///
pub fn execute(session: &Session, args: ArgMatches) -> cli::Result<()> {
    let payload = payload(&args)?;
    let records = match args.get_one::<u16>(SLOTS) {
        Some(slots) => session.normalizer.hourly_slots_of(&payload, *slots as usize)?,
        None => session.normalizer.hourly(&payload)?,
    };
    match args.get_flag(BY_DATE) {
        true => report_records(&summarize(records), &args, None),
        false => report_records(&records, &args, None),
    }
}

/// Get a summary record for each date of the hourly records.
///
/// # Arguments
///
/// * `records` are the hourly records.
///
fn summarize(records: Vec<WeatherRecord>) -> Vec<WeatherRecord> {
    group_by_date(records)
        .into_iter()
        .filter_map(|(date, hours)| DailyAggregate::new(date, hours))
        .map(|aggregate| aggregate.to_record())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::tests::FORECAST;
    use forecast_lib::prelude::Normalizer;
    use pretty_assertions::assert_eq;
    use toolslib::date_time::{get_date, get_tz};

    #[test]
    fn slots() {
        let mut cmd = Command::new("test").no_binary_name(true).subcommand(command());
        let mut matches = cmd.try_get_matches_from_mut(["hourly", "--slots", "8", FORECAST]).unwrap();
        let (_, args) = matches.remove_subcommand().unwrap();
        assert_eq!(args.get_one::<u16>(SLOTS), Some(&8));
        assert!(!args.get_flag(BY_DATE));
        assert!(cmd.try_get_matches_from_mut(["hourly", "--slots", "0", FORECAST]).is_err());
    }

    #[test]
    fn summaries() {
        let payload = std::fs::read_to_string(FORECAST).unwrap();
        let records = Normalizer::new(get_tz("UTC").unwrap()).hourly(&payload).unwrap();
        let testcase = summarize(records);
        assert_eq!(testcase.len(), 3);
        assert_eq!(testcase[0].date(), get_date(2024, 6, 1));
        assert_eq!(testcase[0].condition, "N/A");
        // 12 11 13 16 18 19 16 14
        assert_eq!(testcase[0].temperature, 14.875);
        // the only rain in the first 3 days
        assert_eq!(testcase[2].precipitation, 0.4);
    }
}
