//! Tests weather against the comfort criteria of an activity.
//!
//! All day activities test each daily record directly. Activities restricted to a time of
//! day summarize the hourly records inside the window by date and test the summaries.
use crate::entities::{ActivityCriteria, DailyAggregate, TimeRange, WeatherRecord};
use chrono::NaiveDate;

/// Returns `true` if the record is within every bound of the criteria.
///
/// The bounds are inclusive. Temperature and wind speed must be between the minimum and
/// maximum values and precipitation must not be more than the rain limit.
///
/// # Arguments
///
/// * `record` is the weather being tested.
/// * `criteria` are the activity comfort bounds.
///
pub fn matches(record: &WeatherRecord, criteria: &ActivityCriteria) -> bool {
    let temperature_min = criteria.temperature_min() as f64;
    let temperature_max = criteria.temperature_max() as f64;
    (temperature_min..=temperature_max).contains(&record.temperature)
        && record.precipitation <= criteria.max_rain()
        && (criteria.wind_min()..=criteria.wind_max()).contains(&record.wind_speed)
}

/// Get the records whose time of day is inside the window.
///
/// Records that only have a date are never inside a window. A window that starts after it
/// ends will not contain any records.
///
/// # Arguments
///
/// * `records` are the hourly weather records.
/// * `time_range` is the time of day window.
///
pub fn in_window(records: &[WeatherRecord], time_range: &TimeRange) -> Vec<WeatherRecord> {
    records
        .iter()
        .filter(|record| match record.timestamp.time() {
            Some(time) => time_range.contains(&time),
            None => false,
        })
        .cloned()
        .collect()
}

/// Group records by their calendar date.
///
/// The groups are in the order each date first shows up.
pub fn group_by_date(records: Vec<WeatherRecord>) -> Vec<(NaiveDate, Vec<WeatherRecord>)> {
    let mut groups: Vec<(NaiveDate, Vec<WeatherRecord>)> = vec![];
    for record in records {
        let date = record.date();
        match groups.iter_mut().find(|(group_date, _)| group_date == &date) {
            Some((_, group)) => group.push(record),
            None => groups.push((date, vec![record])),
        }
    }
    groups
}

/// Summarize the hourly records inside the window for each date.
///
/// # Arguments
///
/// * `hourly` are the hourly weather records.
/// * `time_range` is the time of day window.
///
pub fn aggregate_in_window(hourly: &[WeatherRecord], time_range: &TimeRange) -> Vec<DailyAggregate> {
    let windowed = in_window(hourly, time_range);
    log::trace!("{} of {} hourly records are in the {:?} window", windowed.len(), hourly.len(), time_range);
    group_by_date(windowed).into_iter().filter_map(|(date, hours)| DailyAggregate::new(date, hours)).collect()
}

/// Returns `true` if the daily summary is within the criteria bounds.
///
/// The average temperature and total rain are tested like a daily record. Wind is tested
/// against the extremes, the slowest hour must clear the minimum wind speed and the fastest
/// hour cannot be above the maximum.
///
/// # Arguments
///
/// * `aggregate` is the summary of the hourly records for a date.
/// * `criteria` are the activity comfort bounds.
///
pub fn matches_aggregate(aggregate: &DailyAggregate, criteria: &ActivityCriteria) -> bool {
    let temperature_min = criteria.temperature_min() as f64;
    let temperature_max = criteria.temperature_max() as f64;
    (temperature_min..=temperature_max).contains(&aggregate.avg_temperature)
        && aggregate.total_rain <= criteria.max_rain()
        && criteria.wind_min() <= aggregate.min_wind_speed
        && aggregate.max_wind_speed <= criteria.wind_max()
}

/// Get the records for a date.
///
/// # Arguments
///
/// * `records` are the weather records.
/// * `date` is the calendar date of interest.
///
pub fn records_on(records: &[WeatherRecord], date: &NaiveDate) -> Vec<WeatherRecord> {
    records.iter().filter(|record| &record.date() == date).cloned().collect()
}
