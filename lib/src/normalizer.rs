//! Converts provider forecast payloads into weather records.
//!
//! The provider reports weather in 3 hour slots. A forecast payload holds a `list` of
//! slots while the current conditions payload is a single slot. Slot timestamps are
//! epoch seconds and get converted to the wall clock time of the configured timezone.
use crate::{
    config::Config,
    entities::{Forecast, ForecastKind, RecordTime, WeatherRecord},
    err, Result,
};
use chrono_tz::Tz;
use provider::{ProviderForecast, ProviderSlot};
use toolslib::date_time::tz_local_ts;

/// The provider reports wind speed in m/s, records use km/h.
const MS_TO_KMH: f64 = 3.6;

/// The number of provider slots in a day.
const SLOTS_PER_DAY: usize = 8;

/// The default number of hourly slots.
pub const DEFAULT_HOURLY_SLOTS: usize = 24;

/// Creates the current, hourly, and daily weather records from provider payloads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// The timezone records are shown in.
    tz: Tz,
    /// The number of slots in the hourly forecast.
    hourly_slots: usize,
}
impl From<&Config> for Normalizer {
    fn from(config: &Config) -> Self {
        Normalizer::new(config.forecast.timezone).with_hourly_slots(config.forecast.hourly_slots)
    }
}
impl Normalizer {
    /// Create the normalizer for a timezone.
    ///
    /// # Arguments
    ///
    /// * `tz` is the timezone of the normalized records.
    ///
    pub fn new(tz: Tz) -> Self {
        Self { tz, hourly_slots: DEFAULT_HOURLY_SLOTS }
    }
    /// A builder method that sets the number of slots [hourly](Self::hourly) will return.
    pub fn with_hourly_slots(mut self, hourly_slots: usize) -> Self {
        self.hourly_slots = hourly_slots;
        self
    }
    /// The number of slots in the hourly forecast.
    pub fn hourly_slots(&self) -> usize {
        self.hourly_slots
    }
    /// Normalize a provider payload.
    ///
    /// # Arguments
    ///
    /// * `payload` is the provider `JSON` document.
    /// * `kind` selects which records will be created.
    ///
    pub fn normalize(&self, payload: &str, kind: ForecastKind) -> Result<Forecast> {
        crate::log_elapsed_time!("normalize");
        let forecast = match kind {
            ForecastKind::Current => Forecast::Current(self.current(payload)?),
            ForecastKind::Hourly(slots) => Forecast::Hourly(self.hourly_slots_of(payload, slots)?),
            ForecastKind::Daily => Forecast::Daily(self.daily(payload)?),
        };
        Ok(forecast)
    }
    /// Get the current conditions from a single slot payload.
    pub fn current(&self, payload: &str) -> Result<WeatherRecord> {
        let slot = provider::parse::<ProviderSlot>(payload)?;
        let record = self.to_record(slot, ForecastKind::Current)?;
        log::debug!("normalized current conditions for {}", record.timestamp);
        Ok(record)
    }
    /// Get the configured number of hourly records from a forecast payload.
    pub fn hourly(&self, payload: &str) -> Result<Vec<WeatherRecord>> {
        self.hourly_slots_of(payload, self.hourly_slots)
    }
    /// Get the first slots of a forecast payload.
    ///
    /// # Arguments
    ///
    /// * `payload` is the provider forecast document.
    /// * `slots` is the most records that will be returned.
    ///
    pub fn hourly_slots_of(&self, payload: &str, slots: usize) -> Result<Vec<WeatherRecord>> {
        let forecast = provider::parse::<ProviderForecast>(payload)?;
        let records = forecast
            .list
            .into_iter()
            .take(slots)
            .map(|slot| self.to_record(slot, ForecastKind::Hourly(slots)))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("normalized {} hourly records", records.len());
        Ok(records)
    }
    /// Get a record for each day of a forecast payload.
    ///
    /// The first slot of every 24 hour block is used as is, it is not a summary of the day.
    pub fn daily(&self, payload: &str) -> Result<Vec<WeatherRecord>> {
        let forecast = provider::parse::<ProviderForecast>(payload)?;
        let records = forecast
            .list
            .into_iter()
            .step_by(SLOTS_PER_DAY)
            .map(|slot| self.to_record(slot, ForecastKind::Daily))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("normalized {} daily records", records.len());
        Ok(records)
    }
    /// Convert a provider slot into a weather record.
    fn to_record(&self, slot: ProviderSlot, kind: ForecastKind) -> Result<WeatherRecord> {
        let local = match tz_local_ts(slot.dt, &self.tz) {
            Ok(local) => local,
            Err(error) => return err!(Payload, "{}", error),
        };
        let timestamp = match kind {
            ForecastKind::Daily => RecordTime::Date(local.date()),
            _ => RecordTime::DateTime(local),
        };
        let condition = match slot.weather.into_iter().next() {
            Some(weather) => weather.description,
            None => return err!(Payload, "slot {} is missing the weather description.", slot.dt),
        };
        let rain = slot.rain.unwrap_or_default();
        let precipitation = match kind {
            ForecastKind::Current => rain.one_hour,
            _ => rain.three_hours,
        };
        Ok(WeatherRecord {
            timestamp,
            temperature: slot.main.temp,
            condition,
            wind_speed: slot.wind.speed * MS_TO_KMH,
            precipitation: precipitation.unwrap_or(0.0),
        })
    }
}

mod provider {
    //! The fields of interest from the provider documents.

    use super::*;
    use serde::{de::DeserializeOwned, Deserialize};

    /// Parse a provider document.
    pub(super) fn parse<T: DeserializeOwned>(payload: &str) -> Result<T> {
        match serde_json::from_str::<T>(payload) {
            Ok(document) => Ok(document),
            Err(error) => err!(Payload, "{}", error),
        }
    }

    /// The provider forecast document.
    #[derive(Debug, Deserialize)]
    pub(super) struct ProviderForecast {
        /// The forecast slots in chronological order.
        pub list: Vec<ProviderSlot>,
    }

    /// The weather for a slot.
    #[derive(Debug, Deserialize)]
    pub(super) struct ProviderSlot {
        /// The slot time in epoch seconds.
        pub dt: i64,
        pub main: Main,
        pub weather: Vec<Weather>,
        pub wind: Wind,
        /// The provider leaves this out when it's not raining.
        pub rain: Option<Rain>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Main {
        /// The temperature in Celsius.
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Weather {
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct Wind {
        /// The wind speed in m/s.
        pub speed: f64,
    }

    /// Current conditions report the last hour of rain, forecasts the 3 hour slot.
    #[derive(Debug, Default, Deserialize)]
    pub(super) struct Rain {
        #[serde(rename = "1h")]
        pub one_hour: Option<f64>,
        #[serde(rename = "3h")]
        pub three_hours: Option<f64>,
    }
}
