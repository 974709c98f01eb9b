//! Orders the days that suit an activity.
use crate::{
    entities::{ActivityCriteria, BestDays, DailyAggregate, WeatherRecord},
    matcher::{aggregate_in_window, matches, matches_aggregate},
};
use std::cmp::Ordering;

/// The weather values used to rank a day.
pub trait Candidate {
    /// The temperature in Celsius.
    fn temperature(&self) -> f64;
    /// The rain in mm.
    fn precipitation(&self) -> f64;
    /// The wind speed in km/h.
    fn wind_speed(&self) -> f64;
}

impl Candidate for WeatherRecord {
    fn temperature(&self) -> f64 {
        self.temperature
    }
    fn precipitation(&self) -> f64 {
        self.precipitation
    }
    fn wind_speed(&self) -> f64 {
        self.wind_speed
    }
}

impl Candidate for DailyAggregate {
    fn temperature(&self) -> f64 {
        self.avg_temperature
    }
    fn precipitation(&self) -> f64 {
        self.total_rain
    }
    fn wind_speed(&self) -> f64 {
        self.avg_wind_speed
    }
}

/// How many of the best days will be kept, `None` keeps all of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankingLimits {
    /// The limit for activities that can happen any time of day.
    pub all_day: Option<usize>,
    /// The limit for activities restricted to a time of day.
    pub time_windowed: Option<usize>,
}
impl Default for RankingLimits {
    /// All day activities keep the top 5 days, time of day activities keep everything.
    fn default() -> Self {
        Self { all_day: Some(5), time_windowed: None }
    }
}

/// Sort candidates by how well they suit the activity.
///
/// The closest temperature to the middle of the activity range comes first. Ties are broken
/// by the least rain then the least wind. Candidates that tie on all three keep their
/// original order.
///
/// # Arguments
///
/// * `candidates` are the days being ranked.
/// * `criteria` are the activity comfort bounds.
/// * `limit` is the most candidates that will be returned, `None` returns them all.
///
pub fn rank<C: Candidate>(mut candidates: Vec<C>, criteria: &ActivityCriteria, limit: Option<usize>) -> Vec<C> {
    let midpoint = criteria.midpoint_temperature();
    let distance = |candidate: &C| (midpoint - candidate.temperature()).abs();
    // sort_by is stable
    candidates.sort_by(|lhs, rhs| {
        let ordering = distance(lhs).total_cmp(&distance(rhs));
        let ordering = match ordering {
            Ordering::Equal => lhs.precipitation().total_cmp(&rhs.precipitation()),
            _ => ordering,
        };
        match ordering {
            Ordering::Equal => lhs.wind_speed().total_cmp(&rhs.wind_speed()),
            _ => ordering,
        }
    });
    if let Some(limit) = limit {
        candidates.truncate(limit);
    }
    candidates
}

/// Find the best days for an activity.
///
/// Activities that can happen any time use the daily records. Activities restricted to a
/// time of day summarize the hourly records inside the window for each date instead.
///
/// # Arguments
///
/// * `daily` are the daily weather records.
/// * `hourly` are the hourly weather records.
/// * `criteria` are the activity comfort bounds.
/// * `limits` control how many days are returned.
///
pub fn find_best_days(
    daily: &[WeatherRecord],
    hourly: &[WeatherRecord],
    criteria: &ActivityCriteria,
    limits: &RankingLimits,
) -> BestDays {
    crate::log_elapsed_time!("find_best_days");
    match criteria.is_time_windowed() {
        true => {
            let aggregates: Vec<DailyAggregate> = aggregate_in_window(hourly, criteria.time_range())
                .into_iter()
                .filter(|aggregate| matches_aggregate(aggregate, criteria))
                .collect();
            log::debug!("'{}' matched {} time of day summaries", criteria.name(), aggregates.len());
            BestDays::TimeWindowed(rank(aggregates, criteria, limits.time_windowed))
        }
        false => {
            let records: Vec<WeatherRecord> =
                daily.iter().filter(|record| matches(record, criteria)).cloned().collect();
            log::debug!("'{}' matched {} of {} days", criteria.name(), records.len(), daily.len());
            BestDays::AllDay(rank(records, criteria, limits.all_day))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::RecordTime, normalizer::Normalizer};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use toolslib::date_time::{get_date, get_time, get_tz};

    const FORECAST: &str = include_str!("../resources/tests/forecast.json");

    fn record(day: u32, temperature: f64, precipitation: f64, wind_speed: f64) -> WeatherRecord {
        WeatherRecord {
            timestamp: RecordTime::Date(get_date(2024, 6, day)),
            temperature,
            condition: "clear sky".to_string(),
            wind_speed,
            precipitation,
        }
    }

    fn dates(records: &[WeatherRecord]) -> Vec<NaiveDate> {
        records.iter().map(WeatherRecord::date).collect()
    }

    fn fixture() -> (Vec<WeatherRecord>, Vec<WeatherRecord>) {
        let normalizer = Normalizer::new(get_tz("UTC").unwrap());
        (normalizer.daily(FORECAST).unwrap(), normalizer.hourly(FORECAST).unwrap())
    }

    #[test]
    fn midpoint_order() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 20)
            .max_rain(1.0)
            .wind(0.0, 20.0)
            .build()
            .unwrap();
        let records = vec![
            record(1, 11.0, 0.0, 0.0),
            record(2, 15.0, 0.0, 0.0),
            record(3, 19.0, 0.0, 0.0),
            record(4, 13.5, 0.0, 0.0),
        ];
        let testcase = rank(records, &criteria, None);
        assert_eq!(
            dates(&testcase),
            vec![get_date(2024, 6, 2), get_date(2024, 6, 4), get_date(2024, 6, 1), get_date(2024, 6, 3)]
        );
    }

    #[test]
    fn tie_breaks() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 20)
            .max_rain(1.0)
            .wind(0.0, 20.0)
            .build()
            .unwrap();
        // 12 and 18 are both 3 degrees from the middle so rain decides
        let testcase = rank(vec![record(1, 12.0, 0.2, 5.0), record(2, 18.0, 0.0, 5.0)], &criteria, None);
        assert_eq!(testcase[0].temperature, 18.0);
        // then wind
        let testcase = rank(vec![record(1, 12.0, 0.0, 8.0), record(2, 18.0, 0.0, 5.0)], &criteria, None);
        assert_eq!(testcase[0].temperature, 18.0);
        let testcase = rank(vec![record(1, 18.0, 0.0, 8.0), record(2, 12.0, 0.0, 5.0)], &criteria, None);
        assert_eq!(testcase[0].temperature, 12.0);
        // then the input order
        let testcase = rank(vec![record(1, 12.0, 0.0, 5.0), record(2, 18.0, 0.0, 5.0)], &criteria, None);
        assert_eq!(dates(&testcase), vec![get_date(2024, 6, 1), get_date(2024, 6, 2)]);
        let testcase = rank(vec![record(2, 18.0, 0.0, 5.0), record(1, 12.0, 0.0, 5.0)], &criteria, None);
        assert_eq!(dates(&testcase), vec![get_date(2024, 6, 2), get_date(2024, 6, 1)]);
    }

    #[test]
    fn deterministic() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(0, 30)
            .max_rain(5.0)
            .wind(0.0, 50.0)
            .build()
            .unwrap();
        let records: Vec<WeatherRecord> =
            (1..=20).map(|day| record(day, (day % 7) as f64 * 4.0, (day % 3) as f64 * 0.5, (day % 4) as f64)).collect();
        let first = rank(records.clone(), &criteria, None);
        let second = rank(records.clone(), &criteria, None);
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
        assert_eq!(rank(records, &criteria, Some(3)), first[..3].to_vec());
    }

    #[test]
    fn ranks_aggregates() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 20)
            .max_rain(1.0)
            .wind(0.0, 20.0)
            .build()
            .unwrap();
        let aggregate = |day: u32, temperature: f64, winds: [f64; 2]| {
            let hours = winds
                .iter()
                .enumerate()
                .map(|(hour, wind_speed)| WeatherRecord {
                    timestamp: RecordTime::DateTime(get_date(2024, 6, day).and_time(get_time(hour as u32, 0, 0))),
                    temperature,
                    condition: "clear sky".to_string(),
                    wind_speed: *wind_speed,
                    precipitation: 0.0,
                })
                .collect();
            DailyAggregate::new(get_date(2024, 6, day), hours).unwrap()
        };
        // same temperature and rain, the average of the extreme winds decides
        let testcase = rank(vec![aggregate(1, 15.0, [2.0, 12.0]), aggregate(2, 15.0, [4.0, 6.0])], &criteria, None);
        assert_eq!(testcase[0].date, get_date(2024, 6, 2));
        assert_eq!(testcase[1].date, get_date(2024, 6, 1));
    }

    #[test]
    fn all_day_example() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 25)
            .max_rain(0.0)
            .wind(0.0, 15.0)
            .build()
            .unwrap();
        let daily = vec![record(1, 15.0, 0.0, 10.0), record(2, 30.0, 0.0, 5.0), record(3, 20.0, 0.5, 20.0)];
        let testcase = find_best_days(&daily, &[], &criteria, &RankingLimits::default());
        assert_eq!(testcase, BestDays::AllDay(vec![daily[0].clone()]));
    }

    #[test]
    fn all_day_limit() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(0, 30)
            .max_rain(0.0)
            .wind(0.0, 20.0)
            .build()
            .unwrap();
        let daily: Vec<WeatherRecord> = (1..=8).map(|day| record(day, 10.0 + day as f64, 0.0, 5.0)).collect();
        let testcase = find_best_days(&daily, &[], &criteria, &RankingLimits::default());
        assert_eq!(testcase.len(), 5);
        let limits = RankingLimits { all_day: None, time_windowed: None };
        assert_eq!(find_best_days(&daily, &[], &criteria, &limits).len(), 8);
        let limits = RankingLimits { all_day: Some(2), time_windowed: None };
        assert_eq!(find_best_days(&daily, &[], &criteria, &limits).len(), 2);
    }

    #[test]
    fn time_windowed_is_unbounded() {
        let criteria = ActivityCriteria::builder("test")
            .temperature(0, 30)
            .max_rain(0.0)
            .wind(0.0, 20.0)
            .time_range("06:00", "18:00")
            .build()
            .unwrap();
        let hourly: Vec<WeatherRecord> = (1..=7)
            .flat_map(|day| {
                (0..8).map(move |slot| WeatherRecord {
                    timestamp: RecordTime::DateTime(get_date(2024, 6, day).and_time(get_time(slot * 3, 0, 0))),
                    temperature: 10.0 + day as f64,
                    condition: "clear sky".to_string(),
                    wind_speed: 5.0,
                    precipitation: 0.0,
                })
            })
            .collect();
        let testcase = find_best_days(&[], &hourly, &criteria, &RankingLimits::default());
        assert_eq!(testcase.len(), 7);
        let limits = RankingLimits { all_day: Some(5), time_windowed: Some(3) };
        assert_eq!(find_best_days(&[], &hourly, &criteria, &limits).len(), 3);
    }

    #[test]
    fn forecast_all_day() {
        let (daily, hourly) = fixture();
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 25)
            .max_rain(0.0)
            .wind(0.0, 15.0)
            .build()
            .unwrap();
        let testcase = find_best_days(&daily, &hourly, &criteria, &RankingLimits::default());
        let expected = vec![get_date(2024, 6, 5), get_date(2024, 6, 2), get_date(2024, 6, 1), get_date(2024, 6, 3)];
        assert_eq!(dates(&testcase.to_records()), expected);
        let walking = ActivityCriteria::builder("walking")
            .temperature(18, 30)
            .max_rain(0.0)
            .wind(0.0, 10.0)
            .build()
            .unwrap();
        let testcase = find_best_days(&daily, &hourly, &walking, &RankingLimits::default());
        assert_eq!(dates(&testcase.to_records()), vec![get_date(2024, 6, 2)]);
        let freezing = ActivityCriteria::builder("skating")
            .temperature(-10, 0)
            .max_rain(0.0)
            .wind(0.0, 10.0)
            .build()
            .unwrap();
        assert!(find_best_days(&daily, &hourly, &freezing, &RankingLimits::default()).is_empty());
    }

    #[test]
    fn forecast_time_windowed() {
        let (daily, hourly) = fixture();
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 25)
            .max_rain(0.0)
            .wind(0.0, 13.0)
            .time_range("06:00", "12:00")
            .build()
            .unwrap();
        match find_best_days(&daily, &hourly, &criteria, &RankingLimits::default()) {
            BestDays::TimeWindowed(aggregates) => {
                assert_eq!(aggregates.len(), 2);
                assert_eq!(aggregates[0].date, get_date(2024, 6, 1));
                assert!((aggregates[0].avg_temperature - 47.0 / 3.0).abs() < 1e-9);
                assert!((aggregates[0].avg_wind_speed - 11.7).abs() < 1e-9);
                assert_eq!(aggregates[0].hours.len(), 3);
                assert_eq!(aggregates[1].date, get_date(2024, 6, 2));
            }
            best_days => panic!("expected time windowed days {:?}", best_days),
        }
        let criteria = ActivityCriteria::builder("test")
            .temperature(10, 25)
            .max_rain(0.0)
            .wind(8.0, 13.0)
            .time_range("06:00", "12:00")
            .build()
            .unwrap();
        let testcase = find_best_days(&daily, &hourly, &criteria, &RankingLimits::default());
        assert_eq!(dates(&testcase.to_records()), vec![get_date(2024, 6, 1)]);
    }
}
