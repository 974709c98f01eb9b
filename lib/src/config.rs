//! Utilities to load the application configuration from `TOML` files at runtime.
use crate::{err, ranker::RankingLimits, Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_FILENAME: &str = "forecast.toml";

/// The application configuration.
#[derive(Debug)]
pub struct Config {
    pub forecast: forecast::Properties,
    pub activities: activities::Properties,
    pub ranking: ranking::Properties,
}
impl Config {
    /// Load the configuration.
    ///
    /// If a path is not provided the default `forecast.toml` filename will be used if
    /// it exists, otherwise the defaults are used.
    pub fn new(optional_path: Option<PathBuf>) -> Result<Config> {
        config_file::load(optional_path)
    }
    /// The number of best days to keep for an activity.
    pub fn ranking_limits(&self) -> RankingLimits {
        RankingLimits { all_day: self.ranking.all_day_limit, time_windowed: self.ranking.time_window_limit }
    }
    /// The activity catalog file.
    pub fn activities_path(&self) -> PathBuf {
        PathBuf::from(&self.activities.filename)
    }
}
impl TryFrom<&str> for Config {
    type Error = Error;
    /// Attempt to load the configuration from a string.
    fn try_from(config_str: &str) -> std::result::Result<Self, Self::Error> {
        Self::try_from(config_file::load_str(config_str)?)
    }
}

mod config_file {
    //! The configuration file manager.
    use super::*;
    use std::fs;

    /// Try to get the configuration from the file pathname. If it was not provided
    /// try the default filename. If the default filename does not exist use defaults.
    pub fn load(optional_path: Option<PathBuf>) -> Result<Config> {
        match optional_path {
            Some(path) => match (path.exists(), path.is_file()) {
                (true, true) => Config::try_from(load_path(&path)?),
                (true, false) => err!(Config, "'{}' is not a file.", path.display()),
                _ => err!(Config, "'{}' was not found.", path.display()),
            },
            None => {
                let path = PathBuf::from(DEFAULT_FILENAME);
                match (path.exists(), path.is_file()) {
                    (true, true) => Config::try_from(load_path(&path)?),
                    (true, false) => err!(Config, "{} is not a file.", DEFAULT_FILENAME),
                    _ => {
                        log::info!("Did not find a configuration file, using defaults");
                        Config::try_from(ConfigDocument::default())
                    }
                }
            }
        }
    }

    /// The structure that holds the configuration document.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ConfigDocument {
        pub forecast: Option<forecast::Document>,
        pub activities: Option<activities::Document>,
        pub ranking: Option<ranking::Document>,
    }
    impl TryFrom<ConfigDocument> for Config {
        type Error = Error;
        /// Create the configuration from the document, the timezone name must be known.
        fn try_from(config_document: ConfigDocument) -> std::result::Result<Self, Self::Error> {
            Ok(Config {
                forecast: forecast::Properties::try_from(config_document.forecast)?,
                activities: activities::Properties::from(config_document.activities),
                ranking: ranking::Properties::from(config_document.ranking),
            })
        }
    }

    /// Attempts to load the configuration from a file.
    fn load_path(path: &Path) -> Result<ConfigDocument> {
        match fs::read_to_string(path) {
            Ok(contents) => load_str(&contents),
            Err(error) => err!(Config, "Could not read '{}' ({}).", path.display(), error),
        }
    }

    /// Attempts to load the configuration from a string.
    pub fn load_str(config: &str) -> Result<ConfigDocument> {
        match toml::from_str::<ConfigDocument>(config) {
            Ok(config) => Ok(config),
            Err(error) => err!(Config, "Could not load the configuration ({}).", error),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use pretty_assertions::assert_eq;

        macro_rules! as_ref {
            ($value:expr) => {
                $value.as_ref().unwrap()
            };
        }

        #[test]
        fn load_document() {
            let config = r#"
                [forecast]
                timezone = "America/Denver"
                hourly-slots = 16

                [activities]
                filename = "catalog.json"

                [ranking]
                all-day-limit = 3
                time-window-limit = 10
                "#;
            let testcase = load_str(config).unwrap();
            assert_eq!(as_ref!(testcase.forecast).timezone, Some("America/Denver".to_string()));
            assert_eq!(as_ref!(testcase.forecast).hourly_slots, Some(16));
            assert_eq!(as_ref!(testcase.activities).filename, Some("catalog.json".to_string()));
            assert_eq!(as_ref!(testcase.ranking).all_day_limit, Some(3));
            assert_eq!(as_ref!(testcase.ranking).time_window_limit, Some(10));
            let config = r#"
                [ranking]
                all-day-limit = 0
                "#;
            let testcase = load_str(config).unwrap();
            assert!(testcase.forecast.is_none());
            assert!(testcase.activities.is_none());
            assert_eq!(as_ref!(testcase.ranking).time_window_limit, None);
            assert!(load_str("[forecast]\nhourly-slots = \"many\"").is_err());
        }

        #[test]
        fn config() {
            let config = r#"
                [forecast]
                timezone = "Asia/Manila"

                [ranking]
                all-day-limit = 0
                time-window-limit = 4
                "#;
            let testcase = Config::try_from(config).unwrap();
            assert_eq!(testcase.forecast.timezone, chrono_tz::Asia::Manila);
            assert_eq!(testcase.forecast.hourly_slots, forecast::DEFAULT_HOURLY_SLOTS);
            assert_eq!(testcase.ranking_limits(), RankingLimits { all_day: None, time_windowed: Some(4) });
            match Config::try_from("[forecast]\ntimezone = \"Mars/Olympus_Mons\"") {
                Err(Error::Config(reason)) => assert!(reason.contains("Mars/Olympus_Mons"), "{}", reason),
                result => panic!("expected a config error {:?}", result),
            }
            assert!(matches!(Config::try_from("forecast = 1"), Err(Error::Config(_))));
        }

        #[test]
        fn load_file() {
            let testcase = super::load(Some(PathBuf::from("resources/tests/does-not-exist.toml")));
            assert!(matches!(testcase, Err(Error::Config(_))));
            let testcase = super::load(Some(PathBuf::from("resources/tests")));
            assert!(matches!(testcase, Err(Error::Config(_))));
        }

        #[test]
        fn env() {
            // isolate env setting here to avoid threaded test failures
            env::remove_var(forecast::ENV_TIMEZONE);
            env::remove_var(activities::ENV_FILENAME);
            let testcase = Config::try_from(ConfigDocument::default()).unwrap();
            log::debug!("{:#?}", testcase);
            assert_eq!(testcase.forecast.timezone, chrono_tz::UTC);
            assert_eq!(testcase.forecast.hourly_slots, forecast::DEFAULT_HOURLY_SLOTS);
            assert_eq!(testcase.activities.filename, activities::DEFAULT_FILENAME);
            assert_eq!(testcase.ranking_limits(), RankingLimits::default());
            env::set_var(forecast::ENV_TIMEZONE, "Europe/Paris");
            env::set_var(activities::ENV_FILENAME, "mine.json");
            let testcase = Config::try_from(ConfigDocument::default()).unwrap();
            assert_eq!(testcase.forecast.timezone, chrono_tz::Europe::Paris);
            assert_eq!(testcase.activities_path(), PathBuf::from("mine.json"));
            // the document wins over the environment
            let testcase = Config::try_from("[forecast]\ntimezone = \"UTC\"").unwrap();
            assert_eq!(testcase.forecast.timezone, chrono_tz::UTC);
            env::set_var(forecast::ENV_TIMEZONE, "Nowhere/Special");
            assert!(Config::try_from(ConfigDocument::default()).is_err());
            env::remove_var(forecast::ENV_TIMEZONE);
            env::remove_var(activities::ENV_FILENAME);
        }
    }
}

mod forecast {
    //! The forecast configuration table.
    use super::*;
    use chrono_tz::Tz;
    use toolslib::date_time::get_tz;

    pub const ENV_TIMEZONE: &str = "FORECAST_TZ";
    pub const DEFAULT_TIMEZONE: &str = "UTC";
    pub const DEFAULT_HOURLY_SLOTS: usize = crate::normalizer::DEFAULT_HOURLY_SLOTS;

    #[derive(Debug)]
    pub struct Properties {
        /// The timezone forecast records are shown in.
        pub timezone: Tz,
        /// The number of slots in the hourly forecast.
        pub hourly_slots: usize,
    }
    impl TryFrom<Option<Document>> for Properties {
        type Error = Error;
        /// Convert the document into the configuration table.
        fn try_from(value: Option<Document>) -> std::result::Result<Self, Self::Error> {
            let document = value.unwrap_or_default();
            let tz_name = document.timezone.unwrap_or_else(default_timezone);
            let timezone = match get_tz(&tz_name) {
                Ok(tz) => tz,
                Err(error) => return err!(Config, "Unknown timezone '{}' ({}).", tz_name, error),
            };
            let hourly_slots = document.hourly_slots.unwrap_or(DEFAULT_HOURLY_SLOTS);
            Ok(Properties { timezone, hourly_slots })
        }
    }

    /// The configuration that can be serialized and deserialized.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Document {
        pub timezone: Option<String>,
        pub hourly_slots: Option<usize>,
    }

    /// Gets the default timezone from the process environment if [ENV_TIMEZONE] is defined.
    fn default_timezone() -> String {
        env::var(ENV_TIMEZONE).unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string())
    }
}

mod activities {
    //! The activity catalog configuration table.
    use super::*;

    pub const ENV_FILENAME: &str = "FORECAST_ACTIVITIES";
    pub const DEFAULT_FILENAME: &str = "activities.json";

    #[derive(Debug)]
    pub struct Properties {
        pub filename: String,
    }
    impl From<Option<Document>> for Properties {
        /// Convert the document into the configuration table.
        fn from(value: Option<Document>) -> Self {
            let filename = value.and_then(|document| document.filename).unwrap_or_else(default_filename);
            Properties { filename }
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Document {
        pub filename: Option<String>,
    }

    fn default_filename() -> String {
        env::var(ENV_FILENAME).unwrap_or_else(|_| DEFAULT_FILENAME.to_string())
    }
}

mod ranking {
    //! The best days configuration table.
    use super::*;

    #[derive(Debug)]
    pub struct Properties {
        /// `None` keeps every matching day.
        pub all_day_limit: Option<usize>,
        pub time_window_limit: Option<usize>,
    }
    impl From<Option<Document>> for Properties {
        /// Convert the document into the configuration table. A limit of 0 is the same as no limit.
        fn from(value: Option<Document>) -> Self {
            let defaults = RankingLimits::default();
            match value {
                Some(document) => Properties {
                    all_day_limit: match document.all_day_limit {
                        Some(0) => None,
                        Some(limit) => Some(limit),
                        None => defaults.all_day,
                    },
                    time_window_limit: document.time_window_limit.filter(|limit| *limit > 0),
                },
                None => Properties { all_day_limit: defaults.all_day, time_window_limit: defaults.time_windowed },
            }
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Document {
        pub all_day_limit: Option<usize>,
        pub time_window_limit: Option<usize>,
    }
}
