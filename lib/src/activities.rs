//! The named activities and their comfort criteria.
use crate::{entities::ActivityCriteria, err, Error, Result};
use document::CriteriaDocument;
use serde_json::{Map, Value};
use std::{fs, path::Path};

/// The activities a forecast can be matched against, kept in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCatalog(Vec<ActivityCriteria>);
impl Default for ActivityCatalog {
    /// The catalog used before any activities have been saved.
    fn default() -> Self {
        let walking = ActivityCriteria::builder("walking").temperature(18, 30).max_rain(0.0).wind(0.0, 10.0).build();
        Self(walking.into_iter().collect())
    }
}
impl ActivityCatalog {
    /// Create a catalog without any activities.
    pub fn empty() -> Self {
        Self(vec![])
    }
    /// Load the catalog from a file, the default catalog is used if the file does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` is the activity catalog `JSON` file.
    ///
    pub fn load(path: &Path) -> Result<Self> {
        crate::log_elapsed_time!("ActivityCatalog::load");
        if !path.exists() {
            log::info!("'{}' was not found, using the default activities", path.display());
            return Ok(Self::default());
        }
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(error) => err!(Catalog, "Could not read '{}' ({}).", path.display(), error),
        }
    }
    /// Create the catalog from a `JSON` document.
    ///
    /// The document is an object of activity names to criteria. A document with an
    /// `activities` object holding the activities is also accepted. Activities that
    /// are not valid are logged and left out.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut root = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(root)) => root,
            Ok(_) => return err!(Catalog, "The document must be a JSON object."),
            Err(error) => return err!(Catalog, "{}", error),
        };
        let wrapped = matches!(
            root.get("activities"),
            Some(Value::Object(activities)) if !activities.contains_key("temp_min")
        );
        let entries = match wrapped {
            true => match root.remove("activities") {
                Some(Value::Object(activities)) => activities,
                _ => Map::new(),
            },
            false => root,
        };
        let mut catalog = Self::empty();
        for (name, value) in entries {
            match Self::entry(&name, value) {
                Ok(criteria) => catalog.insert(criteria),
                Err(error) => log::warn!("Skipping activity '{}': {}", name, error),
            }
        }
        log::debug!("loaded {} activities", catalog.len());
        Ok(catalog)
    }
    /// Convert a document entry into activity criteria.
    fn entry(name: &str, value: Value) -> Result<ActivityCriteria> {
        match serde_json::from_value::<CriteriaDocument>(value) {
            Ok(document) => document.into_criteria(name),
            Err(error) => err!(Criteria, "{}", error),
        }
    }
    /// Get the catalog as a `JSON` document.
    ///
    /// # Arguments
    ///
    /// * `pretty` determines if the document will be indented.
    ///
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let mut root = Map::new();
        for criteria in &self.0 {
            let document = CriteriaDocument::from(criteria);
            match serde_json::to_value(document) {
                Ok(value) => root.insert(criteria.name().to_string(), value),
                Err(error) => return err!(Catalog, "{}", error),
            };
        }
        let root = Value::Object(root);
        let json = match pretty {
            true => serde_json::to_string_pretty(&root),
            false => serde_json::to_string(&root),
        };
        json.map_err(|error| Error::Catalog(error.to_string()))
    }
    /// Get an activity by name, the name is not case sensitive.
    pub fn get(&self, name: &str) -> Result<&ActivityCriteria> {
        match self.position(name) {
            Some(index) => Ok(&self.0[index]),
            None => err!(ActivityNotFound, "{}", name.trim()),
        }
    }
    /// Returns `true` if the activity is in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
    /// Add an activity replacing the existing activity with the same name.
    pub fn insert(&mut self, criteria: ActivityCriteria) {
        match self.position(criteria.name()) {
            Some(index) => self.0[index] = criteria,
            None => self.0.push(criteria),
        }
    }
    /// Remove an activity, `true` is returned if it was in the catalog.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }
    /// The activity names.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(ActivityCriteria::name).collect()
    }
    pub fn iter(&self) -> impl Iterator<Item = &ActivityCriteria> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.0.iter().position(|criteria| criteria.name() == name)
    }
}

mod document {
    //! The activity criteria `JSON` representation.
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, Serialize)]
    pub(super) struct CriteriaDocument {
        temp_min: i32,
        temp_max: i32,
        rain: f64,
        #[serde(default)]
        wind_min: f64,
        wind_max: f64,
        time_range: Option<[String; 2]>,
    }
    impl CriteriaDocument {
        pub(super) fn into_criteria(self, name: &str) -> Result<ActivityCriteria> {
            let builder = ActivityCriteria::builder(name)
                .temperature(self.temp_min, self.temp_max)
                .max_rain(self.rain)
                .wind(self.wind_min, self.wind_max);
            match self.time_range {
                Some([start, end]) => builder.time_range(&start, &end).build(),
                None => builder.build(),
            }
        }
    }
    impl From<&ActivityCriteria> for CriteriaDocument {
        fn from(criteria: &ActivityCriteria) -> Self {
            Self {
                temp_min: criteria.temperature_min(),
                temp_max: criteria.temperature_max(),
                rain: criteria.max_rain(),
                wind_min: criteria.wind_min(),
                wind_max: criteria.wind_max(),
                time_range: Some(criteria.time_range().as_strings()),
            }
        }
    }
}
