//! Structures used by the forecast `API`s.

use crate::{err, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::{json, Value};
use std::fmt;
use toolslib::date_time::{isodate, isodatetime, parse_time};

/// When a weather record applies.
///
/// Daily records only carry the calendar date, hourly and current records carry the
/// wall clock date and time of the configured timezone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordTime {
    /// A calendar date.
    Date(NaiveDate),
    /// A date and time of day.
    DateTime(NaiveDateTime),
}
impl RecordTime {
    /// The calendar date of the record.
    pub fn date(&self) -> NaiveDate {
        match self {
            RecordTime::Date(date) => *date,
            RecordTime::DateTime(datetime) => datetime.date(),
        }
    }
    /// The time of day of the record, `None` for date only records.
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            RecordTime::Date(_) => None,
            RecordTime::DateTime(datetime) => Some(datetime.time()),
        }
    }
}
impl fmt::Display for RecordTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordTime::Date(date) => write!(f, "{}", isodate(date)),
            RecordTime::DateTime(datetime) => write!(f, "{}", isodatetime(datetime)),
        }
    }
}

/// The weather for one forecast slot.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherRecord {
    /// When the weather applies.
    pub timestamp: RecordTime,
    /// The temperature in Celsius.
    pub temperature: f64,
    /// The provider description of the weather (eg. *clear sky*).
    pub condition: String,
    /// The wind speed in km/h.
    pub wind_speed: f64,
    /// The amount of rain in mm.
    pub precipitation: f64,
}
impl WeatherRecord {
    /// The calendar date of the record.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
    /// The condition in title case, a letter following any non-letter is capitalized.
    pub fn display_condition(&self) -> String {
        let mut title = String::with_capacity(self.condition.len());
        let mut word_start = true;
        for c in self.condition.chars() {
            match (c.is_alphabetic(), word_start) {
                (true, true) => title.extend(c.to_uppercase()),
                (true, false) => title.extend(c.to_lowercase()),
                (false, _) => title.push(c),
            }
            word_start = !c.is_alphabetic();
        }
        title
    }
    /// Get the record as a `JSON` document.
    pub fn to_json(&self) -> Value {
        json!({
            "date": self.timestamp.to_string(),
            "temp": self.temperature,
            "weather": self.condition,
            "wind_speed": self.wind_speed,
            "rain": self.precipitation,
        })
    }
}

/// The forecast views that can be created from a provider payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForecastKind {
    /// The current conditions.
    Current,
    /// The first number of slots in the forecast.
    Hourly(usize),
    /// The first slot of each 24 hour block in the forecast.
    Daily,
}

/// A normalized provider payload.
#[derive(Debug, PartialEq)]
pub enum Forecast {
    /// The current conditions.
    Current(WeatherRecord),
    /// The hourly forecast.
    Hourly(Vec<WeatherRecord>),
    /// The daily forecast.
    Daily(Vec<WeatherRecord>),
}
impl Forecast {
    /// The forecast weather records.
    pub fn records(&self) -> &[WeatherRecord] {
        match self {
            Forecast::Current(record) => std::slice::from_ref(record),
            Forecast::Hourly(records) | Forecast::Daily(records) => records,
        }
    }
    /// Consume the forecast returning the weather records.
    pub fn into_records(self) -> Vec<WeatherRecord> {
        match self {
            Forecast::Current(record) => vec![record],
            Forecast::Hourly(records) | Forecast::Daily(records) => records,
        }
    }
}

/// The start of the all day window.
const ALL_DAY_START: &str = "00:00";
/// The end of the all day window.
const ALL_DAY_END: &str = "23:59";

/// The time of day an activity can happen.
///
/// The window never wraps past midnight. A window whose start is after the end
/// contains nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeRange {
    /// The inclusive start time.
    pub start: NaiveTime,
    /// The inclusive end time.
    pub end: NaiveTime,
    /// The start and end as they were given.
    text: [String; 2],
}
impl Default for TimeRange {
    /// The default window, `00:00` to `23:59`, means there is no time restriction.
    fn default() -> Self {
        Self {
            start: NaiveTime::default(),
            end: Self::all_day_end(),
            text: [ALL_DAY_START.to_string(), ALL_DAY_END.to_string()],
        }
    }
}
impl TimeRange {
    /// Create the time range from `HH:MM` strings.
    ///
    /// # Arguments
    ///
    /// * `start` is the window start time.
    /// * `end` is the window end time.
    ///
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        match (parse_time(start), parse_time(end)) {
            (Ok(start_time), Ok(end_time)) => {
                Ok(Self { start: start_time, end: end_time, text: [start.to_string(), end.to_string()] })
            }
            (Err(error), _) | (_, Err(error)) => err!(Criteria, "{}", error),
        }
    }
    /// The end of the all day window.
    fn all_day_end() -> NaiveTime {
        NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
    }
    /// Returns `true` if the range was given exactly as `00:00` to `23:59`.
    pub fn is_all_day(&self) -> bool {
        self.text[0] == ALL_DAY_START && self.text[1] == ALL_DAY_END
    }
    /// Returns `true` if the time of day is within the window, checked to the minute.
    pub fn contains(&self, time: &NaiveTime) -> bool {
        let time = time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(*time);
        self.start <= time && time <= self.end
    }
    /// The range as the pair of strings it was created from.
    pub fn as_strings(&self) -> [String; 2] {
        self.text.clone()
    }
}

/// The weather an activity is comfortable in.
///
/// Criteria can only be created through [CriteriaBuilder] so the bounds are always
/// consistent by the time records are matched against them.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityCriteria {
    name: String,
    temperature_min: i32,
    temperature_max: i32,
    max_rain: f64,
    wind_min: f64,
    wind_max: f64,
    time_range: TimeRange,
}
impl ActivityCriteria {
    /// Start building the criteria for an activity.
    ///
    /// # Arguments
    ///
    /// * `name` is the activity name, it will be stored lower case.
    ///
    pub fn builder(name: &str) -> CriteriaBuilder {
        CriteriaBuilder {
            name: name.to_string(),
            temperature: None,
            max_rain: None,
            wind: None,
            time_range: None,
        }
    }
    /// The activity name.
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The lowest comfortable temperature in Celsius.
    pub fn temperature_min(&self) -> i32 {
        self.temperature_min
    }
    /// The highest comfortable temperature in Celsius.
    pub fn temperature_max(&self) -> i32 {
        self.temperature_max
    }
    /// The most rain in mm.
    pub fn max_rain(&self) -> f64 {
        self.max_rain
    }
    /// The least wind in km/h.
    pub fn wind_min(&self) -> f64 {
        self.wind_min
    }
    /// The most wind in km/h.
    pub fn wind_max(&self) -> f64 {
        self.wind_max
    }
    /// The time of day window.
    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }
    /// The ideal temperature, half way between the minimum and maximum.
    pub fn midpoint_temperature(&self) -> f64 {
        (self.temperature_min as f64 + self.temperature_max as f64) / 2.0
    }
    /// Returns `true` if the activity is restricted to part of the day.
    pub fn is_time_windowed(&self) -> bool {
        !self.time_range.is_all_day()
    }
    /// The criteria as label and value pairs suitable for display.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let time_range = match self.is_time_windowed() {
            true => {
                let [start, end] = self.time_range.as_strings();
                format!("{} to {}", start, end)
            }
            false => "All Day".to_string(),
        };
        vec![
            ("Temperature Range", format!("{}-{} °C", self.temperature_min, self.temperature_max)),
            ("Max Rain", format!("{} mm", self.max_rain)),
            ("Wind Range", format!("{}-{} km/h", self.wind_min, self.wind_max)),
            ("Time Range", time_range),
        ]
    }
}
impl fmt::Display for ActivityCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self.describe().into_iter().map(|(label, value)| format!("{label}: {value}"));
        write!(f, "{} ({})", self.name, details.collect::<Vec<String>>().join(", "))
    }
}

/// The builder that validates [ActivityCriteria].
#[derive(Debug)]
pub struct CriteriaBuilder {
    name: String,
    temperature: Option<(i32, i32)>,
    max_rain: Option<f64>,
    wind: Option<(f64, f64)>,
    time_range: Option<(String, String)>,
}
impl CriteriaBuilder {
    /// Set the comfortable temperature range in Celsius.
    pub fn temperature(mut self, min: i32, max: i32) -> Self {
        self.temperature.replace((min, max));
        self
    }
    /// Set the most rain in mm.
    pub fn max_rain(mut self, max_rain: f64) -> Self {
        self.max_rain.replace(max_rain);
        self
    }
    /// Set the wind speed range in km/h.
    pub fn wind(mut self, min: f64, max: f64) -> Self {
        self.wind.replace((min, max));
        self
    }
    /// Set the time of day window using `HH:MM` strings.
    pub fn time_range(mut self, start: &str, end: &str) -> Self {
        self.time_range.replace((start.to_string(), end.to_string()));
        self
    }
    /// Validate and create the activity criteria.
    pub fn build(self) -> Result<ActivityCriteria> {
        let name = self.name.trim().to_lowercase();
        if name.is_empty() {
            return err!(Criteria, "The activity name cannot be empty.");
        }
        let (temperature_min, temperature_max) = match self.temperature {
            Some(range) => range,
            None => return err!(Criteria, "'{}' requires a temperature range.", name),
        };
        if temperature_min >= temperature_max {
            return err!(
                Criteria,
                "'{}' minimum temperature {} must be less than the maximum {}.",
                name,
                temperature_min,
                temperature_max
            );
        }
        let max_rain = match self.max_rain {
            Some(max_rain) if max_rain.is_finite() && max_rain >= 0.0 => max_rain,
            Some(max_rain) => return err!(Criteria, "'{}' max rain {} cannot be negative.", name, max_rain),
            None => return err!(Criteria, "'{}' requires the max rain.", name),
        };
        let (wind_min, wind_max) = match self.wind {
            Some((min, max)) if !(min.is_finite() && max.is_finite()) || min < 0.0 || max < 0.0 => {
                return err!(Criteria, "'{}' wind speeds {}-{} cannot be negative.", name, min, max)
            }
            Some((min, max)) if min > max => {
                return err!(Criteria, "'{}' minimum wind {} is more than the maximum {}.", name, min, max)
            }
            Some(range) => range,
            None => return err!(Criteria, "'{}' requires the max wind speed.", name),
        };
        let time_range = match self.time_range {
            Some((start, end)) => TimeRange::parse(&start, &end)?,
            None => TimeRange::default(),
        };
        Ok(ActivityCriteria { name, temperature_min, temperature_max, max_rain, wind_min, wind_max, time_range })
    }
}

/// The summary of hourly records that fall on the same date.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyAggregate {
    /// The date of the hourly records.
    pub date: NaiveDate,
    /// The mean of the hourly temperatures.
    pub avg_temperature: f64,
    /// The sum of the hourly rain.
    pub total_rain: f64,
    /// The lowest hourly wind speed.
    pub min_wind_speed: f64,
    /// The highest hourly wind speed.
    pub max_wind_speed: f64,
    /// Half way between the lowest and highest wind speeds.
    pub avg_wind_speed: f64,
    /// The hourly records that were summarized.
    pub hours: Vec<WeatherRecord>,
}
impl DailyAggregate {
    /// Summarize the hourly records for a date, `None` is returned if there are no records.
    ///
    /// # Arguments
    ///
    /// * `date` is the date of the hourly records.
    /// * `hours` are the records being summarized.
    ///
    pub fn new(date: NaiveDate, hours: Vec<WeatherRecord>) -> Option<Self> {
        if hours.is_empty() {
            return None;
        }
        let count = hours.len() as f64;
        let avg_temperature = hours.iter().map(|hour| hour.temperature).sum::<f64>() / count;
        let total_rain = hours.iter().map(|hour| hour.precipitation).sum::<f64>();
        let min_wind_speed = hours.iter().map(|hour| hour.wind_speed).fold(f64::INFINITY, f64::min);
        let max_wind_speed = hours.iter().map(|hour| hour.wind_speed).fold(f64::NEG_INFINITY, f64::max);
        // This is the mean of the extremes, not of every hour. Ranking depends on it so leave it be.
        let avg_wind_speed = (min_wind_speed + max_wind_speed) / 2.0;
        Some(Self { date, avg_temperature, total_rain, min_wind_speed, max_wind_speed, avg_wind_speed, hours })
    }
    /// The aggregate as a daily weather record.
    pub fn to_record(&self) -> WeatherRecord {
        WeatherRecord {
            timestamp: RecordTime::Date(self.date),
            temperature: self.avg_temperature,
            condition: "N/A".to_string(),
            wind_speed: self.avg_wind_speed,
            precipitation: self.total_rain,
        }
    }
}

/// The ranked days for an activity.
#[derive(Debug, PartialEq)]
pub enum BestDays {
    /// The daily records that matched an all day activity.
    AllDay(Vec<WeatherRecord>),
    /// The daily aggregates that matched an activity restricted to a time of day.
    TimeWindowed(Vec<DailyAggregate>),
}
impl BestDays {
    /// The number of days.
    pub fn len(&self) -> usize {
        match self {
            BestDays::AllDay(records) => records.len(),
            BestDays::TimeWindowed(aggregates) => aggregates.len(),
        }
    }
    /// Returns `true` if no days were good for the activity.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// The days as weather records, in ranked order.
    pub fn to_records(&self) -> Vec<WeatherRecord> {
        match self {
            BestDays::AllDay(records) => records.clone(),
            BestDays::TimeWindowed(aggregates) => aggregates.iter().map(DailyAggregate::to_record).collect(),
        }
    }
}
