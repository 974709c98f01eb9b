//! A library that finds the forecast days best suited to an activity.
//!
//! Forecasts come from a provider that reports weather in 3 hour slots. The slots
//! are normalized into [WeatherRecord](prelude::WeatherRecord)s for the configured
//! timezone which are then matched against the comfort criteria of a named activity.
//! Days that match are ranked by how close they come to the ideal temperature of the
//! activity.
//!
//! # Pieces
//!
//! - The [normalizer](prelude::Normalizer) creates the current, hourly, and daily
//!   views of a provider payload.
//! - The [matcher](prelude::matches) tests a record against activity criteria and
//!   builds daily aggregates for activities restricted to a time of day.
//! - The [ranker](prelude::rank) orders matches by the distance from the middle of
//!   the activity temperature range, then rain, then wind.
//!
//! Nothing in here does I/O other than the [Config](prelude::Config) and the
//! [activity catalog](prelude::ActivityCatalog) loaders. Fetching forecasts is left
//! to the caller.

// Ignore broke links due to --document-private-items not being used.
#![allow(rustdoc::private_intra_doc_links)]

use std::fmt;

/// The library result.
pub type Result<T> = std::result::Result<T, Error>;

/// The library error.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The provider payload is missing data or is not a forecast document.
    Payload(String),
    /// The activity criteria are not valid.
    Criteria(String),
    /// The activity is not in the catalog, this holds the activity name.
    ActivityNotFound(String),
    /// The activity catalog document could not be loaded.
    Catalog(String),
    /// There was a problem with the configuration.
    Config(String),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Payload(reason) => write!(f, "Forecast payload: {}", reason),
            Error::Criteria(reason) => write!(f, "Activity criteria: {}", reason),
            Error::ActivityNotFound(name) => write!(f, "Activity '{}' was not found.", name),
            Error::Catalog(reason) => write!(f, "Activity catalog: {}", reason),
            Error::Config(reason) => write!(f, "Config: {}", reason),
        }
    }
}
impl std::error::Error for Error {}

mod activities;
mod config;
mod entities;
mod matcher;
mod normalizer;
mod ranker;

/// The public forecast library API.
pub mod prelude {
    pub use crate::{
        activities::ActivityCatalog,
        config::Config,
        entities::{
            ActivityCriteria, BestDays, CriteriaBuilder, DailyAggregate, Forecast, ForecastKind, RecordTime, TimeRange,
            WeatherRecord,
        },
        matcher::{aggregate_in_window, group_by_date, in_window, matches, matches_aggregate, records_on},
        normalizer::Normalizer,
        ranker::{find_best_days, rank, Candidate, RankingLimits},
    };
}

/// Logs how long a block of code took when it goes out of scope.
struct LogElapsedTime {
    description: String,
    start: std::time::Instant,
    log_level: log::Level,
}
impl LogElapsedTime {
    pub fn new(description: &str, log_level: Option<log::Level>) -> Self {
        Self {
            description: description.to_string(),
            start: std::time::Instant::now(),
            log_level: log_level.unwrap_or(log::Level::Debug),
        }
    }
}
impl Drop for LogElapsedTime {
    fn drop(&mut self) {
        let micros = self.start.elapsed().as_micros();
        match micros < 1_000 {
            true => log::log!(self.log_level, "{} {}us", self.description, micros),
            false => log::log!(self.log_level, "{} {}ms", self.description, micros / 1_000),
        };
    }
}

macro_rules! log_elapsed_time {
    (info, $description:expr) => {
        let __log_elapsed_time_instance__ = $crate::LogElapsedTime::new($description, Some(log::Level::Info));
    };
    ($description:expr) => {
        let __log_elapsed_time_instance__ = $crate::LogElapsedTime::new($description, None);
    };
}
use log_elapsed_time;

/// Creates an [Error] variant from [format!] compatible arguments.
macro_rules! err {
    ($variant:ident, $($arg:tt)*) => {
        Err($crate::Error::$variant(format!($($arg)*)))
    };
}
use err;
