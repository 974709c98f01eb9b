//! Capture the `chrono` and `chrono-tz` usages to this module.
//!
//! Forecast timestamps arrive as epoch seconds and get shown in a configured
//! timezone, while activity time windows are plain `HH:MM` strings. The helpers
//! here keep those conversions consistent between crates.
use super::{Error, Result};
use chrono::prelude::*;
use chrono_tz::Tz;

/// The format used for date and time strings.
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// The format used for time of day strings.
const TIME_FMT: &str = "%H:%M";

/// Creates an ISO8601 date string.
///
/// The returned string will be formatted as YYYY-MM-DD where:
/// * YYYY is the 4 digit year
/// * MM is the month
/// * DD is the day in the month.
///
/// # Arguments
///
/// * `date` the date that will be converted.
///
pub fn isodate(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Creates a date and time string formatted as `YYYY-MM-DD HH:MM:SS`.
///
/// # Arguments
///
/// * `datetime` the date and time that will be converted.
///
pub fn isodatetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FMT).to_string()
}

/// Converts a date string to a date.
///
/// The date can have the following forms:
///
/// * `YYYY-MM-DD` - where YYYY is the 4 digit year, MM is the 2 digit month, and DD the 2 digit
/// day of month.
/// * `MM-DD-YYYY` - where MM is the 2 digit month, DD is the 2 digit day of month, and YYYY is the
/// 4 digit year.
/// * `MMM-DD-YYYY` - where MMM is the abbreviated month name (always 3 characters), DD is the 2
/// digit day of month, and YYYY is the 4 digit year.
/// * `MM/DD/YYYY` - where MM is the month, DD is the day of month, and YYYY is the 4 digit year.
///
/// # Arguments
///
/// * `date_str` - the date string that will be validated.
///
/// An error will be returned if the date parsing fails.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    for fmt in ["%Y-%m-%d", "%m-%d-%Y", "%b-%d-%Y", "%m/%d/%Y"] {
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Ok(naive_date);
        }
    }
    let patterns = "YYYY-MM-DD, MM-DD-YYYY, MM/DD/YYYY, or MMM-DD-YYYY";
    Err(Error::from(format!("'{}' pattern must be {}.", date_str, patterns)))
}

/// Converts a 24 hour `HH:MM` string into a time of day.
///
/// # Arguments
///
/// * `time_str` - the time string that will be parsed.
///
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    match NaiveTime::parse_from_str(time_str.trim(), TIME_FMT) {
        Ok(time) => Ok(time),
        Err(_) => Err(Error::from(format!("'{}' must be a 24 hour HH:MM time.", time_str))),
    }
}

/// A helper function that gets a timezone for a name of the timezone.
///
/// # Arguments
///
/// * `tz_name` is the timezone name.
pub fn get_tz(tz_name: &str) -> Result<Tz> {
    match tz_name.parse() {
        Ok(tz) => Ok(tz),
        Err(error) => Err(Error::from(format!("{error}"))),
    }
}

/// A boiler plate helper that creates a `NaiveDate` from a year, month, and day.
///
/// If there is an error the default `NaiveDate` will be returned.
///
/// # Arguments
///
/// * `y` is the year of the date.
/// * `m` is the month of the year.
/// * `d` is the day of the month.
pub fn get_date(y: i32, m: u32, d: u32) -> NaiveDate {
    if let Some(nd) = NaiveDate::from_ymd_opt(y, m, d) {
        nd
    } else {
        // not the best solution but for this use case it's fine
        log::error!("Yikes... Bad date year={}, month={}, day={}, returning default!", y, m, d);
        NaiveDate::default()
    }
}

/// A boiler plate helper that creates a `NaiveTime` from hours, minutes, and seconds.
///
/// If there is an error the default `NaiveTime` will be returned.
///
/// # Arguments
///
/// * `h` is the hour of the time.
/// * `m` is the minutes of the hour.
/// * `s` is the seconds of the minute.
pub fn get_time(h: u32, m: u32, s: u32) -> NaiveTime {
    if let Some(nt) = NaiveTime::from_hms_opt(h, m, s) {
        nt
    } else {
        log::error!("Yikes... Bad time hour={}, minute={}, second={}, returning default!", h, m, s);
        NaiveTime::default()
    }
}

/// Converts epoch seconds into the wall clock date and time of a timezone.
///
/// # Arguments
///
/// * `ts` is the number of seconds from the `epoch`.
/// * `tz` is the timezone the wall clock time is taken from.
pub fn tz_local_ts(ts: i64, tz: &Tz) -> Result<NaiveDateTime> {
    match tz.timestamp_opt(ts, 0) {
        chrono::LocalResult::Single(dt) => Ok(dt.naive_local()),
        _ => Err(Error::from(format!("{} is not a valid timestamp for {}.", ts, tz.name()))),
    }
}
