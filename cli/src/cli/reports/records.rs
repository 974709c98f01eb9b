//! The weather record reports.
use super::{csv_to_string, csv_write_record, json_to_string};
use forecast_lib::prelude::WeatherRecord;
use serde_json::Value;
use toolslib::{header, layout, report::ReportSheet, text};

pub mod text {
    //! The weather records text based reporting implementation.
    use super::*;

    /// The metadata controlling the report appearance.
    #[derive(Debug, Default)]
    pub struct Report {
        /// Controls if a separator row will be added between the report headers and report text.
        title_separator: bool,
        /// An optional line shown above the report.
        title: Option<String>,
    }
    impl Report {
        /// Adds a separator row between the report headers and report text.
        pub fn with_title_separator(mut self) -> Self {
            self.title_separator = true;
            self
        }
        /// Show a title above the report.
        pub fn with_title(mut self, title: impl ToString) -> Self {
            self.title.replace(title.to_string());
            self
        }
        /// Generates the weather records text report.
        ///
        /// # Arguments
        ///
        /// * `records` are the weather records that will be reported.
        ///
        pub fn generate(&self, records: &[WeatherRecord]) -> String {
            let mut report = ReportSheet::new(vec![layout!(<), layout!(>), layout!(<), layout!(>), layout!(>)]);
            report.add_row(vec![
                header!("Date"),
                header!("Temperature"),
                header!("Condition"),
                header!("Wind"),
                header!("Rain"),
            ]);
            if self.title_separator {
                report.add_separator();
            }
            for record in records {
                report.add_row(vec![
                    text!(record.timestamp),
                    text!(format!("{:.1} °C", record.temperature)),
                    text!(record.display_condition()),
                    text!(format!("{:.1} km/h", record.wind_speed)),
                    text!(format!("{:.1} mm", record.precipitation)),
                ]);
            }
            match &self.title {
                Some(title) => format!("{}\n{}", title, report),
                None => report.to_string(),
            }
        }
    }
}

pub mod csv {
    //! The weather records CSV based reporting implementation.
    use super::*;
    extern crate csv as csv_lib;

    #[derive(Debug, Default)]
    pub struct Report;
    impl Report {
        /// Generates the weather records CSV report.
        ///
        /// # Arguments
        ///
        /// * `records` are the weather records that will be reported.
        ///
        pub fn generate(&self, records: &[WeatherRecord]) -> String {
            let mut writer = csv_lib::Writer::from_writer(vec![]);
            csv_write_record!(writer, &["date", "temp", "weather", "wind_speed", "rain"]);
            for record in records {
                csv_write_record!(
                    writer,
                    &[
                        record.timestamp.to_string(),
                        record.temperature.to_string(),
                        record.condition.clone(),
                        record.wind_speed.to_string(),
                        record.precipitation.to_string(),
                    ]
                );
            }
            csv_to_string(writer)
        }
    }
}

pub mod json {
    //! The weather records JSON based reporting implementation.
    use super::*;

    #[derive(Debug, Default)]
    pub struct Report(
        /// Controls if the report will be pretty printed or not.
        bool,
    );
    impl Report {
        /// Create a report instance and configure it to pretty print the `JSON` document.
        pub fn pretty_printed() -> Self {
            Self(true)
        }
        /// Generates the weather records `JSON` report, an array of records.
        ///
        /// # Arguments
        ///
        /// * `records` are the weather records that will be reported.
        ///
        pub fn generate(&self, records: &[WeatherRecord]) -> String {
            let document = Value::Array(records.iter().map(WeatherRecord::to_json).collect());
            json_to_string(document, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_lib::prelude::RecordTime;
    use pretty_assertions::assert_eq;
    use toolslib::date_time::{get_date, get_time};

    fn records() -> Vec<WeatherRecord> {
        vec![
            WeatherRecord {
                timestamp: RecordTime::DateTime(get_date(2024, 6, 1).and_time(get_time(9, 0, 0))),
                temperature: 16.0,
                condition: "clear sky".to_string(),
                wind_speed: 10.8,
                precipitation: 0.0,
            },
            WeatherRecord {
                timestamp: RecordTime::DateTime(get_date(2024, 6, 1).and_time(get_time(12, 0, 0))),
                temperature: 18.3,
                condition: "light rain".to_string(),
                wind_speed: 12.6,
                precipitation: 0.4,
            },
        ]
    }

    #[test]
    fn text_report() {
        let testcase = text::Report::default().with_title_separator().generate(&records());
        let rows = testcase.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("       Date         Temperature"));
        assert!(rows[1].starts_with("------------------- -----------"));
        assert_eq!(rows[2], "2024-06-01 09:00:00     16.0 °C Clear Sky  10.8 km/h 0.0 mm");
        assert_eq!(rows[3], "2024-06-01 12:00:00     18.3 °C Light Rain 12.6 km/h 0.4 mm");
        let testcase = text::Report::default().with_title("Hourly").generate(&records());
        assert!(testcase.starts_with("Hourly\n"));
        assert_eq!(testcase.lines().count(), 4);
    }

    #[test]
    fn csv_report() {
        let testcase = csv::Report::default().generate(&records());
        let rows = testcase.lines().collect::<Vec<_>>();
        assert_eq!(rows[0], "date,temp,weather,wind_speed,rain");
        assert_eq!(rows[1], "2024-06-01 09:00:00,16,clear sky,10.8,0");
        assert_eq!(rows[2], "2024-06-01 12:00:00,18.3,light rain,12.6,0.4");
    }

    #[test]
    fn json_report() {
        let testcase = json::Report::default().generate(&records()[..1]);
        assert_eq!(
            testcase,
            r#"[{"date":"2024-06-01 09:00:00","temp":16.0,"weather":"clear sky","wind_speed":10.8,"rain":0.0}]"#
        );
        let testcase = json::Report::pretty_printed().generate(&[]);
        assert_eq!(testcase, "[]");
    }
}
