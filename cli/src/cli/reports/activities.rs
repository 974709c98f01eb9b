//! The activity catalog reports.
use super::{csv_to_string, csv_write_record};
use forecast_lib::prelude::{ActivityCatalog, ActivityCriteria};
use toolslib::{header, layout, report::ReportSheet, text};

pub mod text {
    //! The activities text based reporting implementation.
    use super::*;

    #[derive(Debug, Default)]
    pub struct Report;
    impl Report {
        /// Generates a table of the activities.
        ///
        /// # Arguments
        ///
        /// * `catalog` holds the activities that will be reported.
        ///
        pub fn generate(&self, catalog: &ActivityCatalog) -> String {
            let mut report = ReportSheet::new(vec![layout!(<), layout!(>), layout!(>), layout!(>), layout!(^)]);
            report.add_row(vec![
                header!("Activity"),
                header!("Temperature Range"),
                header!("Max Rain"),
                header!("Wind Range"),
                header!("Time Range"),
            ]);
            report.add_separator();
            for criteria in catalog.iter() {
                let mut row = vec![text!(criteria.name())];
                row.extend(criteria.describe().into_iter().map(|(_, value)| text!(value)));
                report.add_row(row);
            }
            report.to_string()
        }
        /// Generates the details of an activity.
        ///
        /// # Arguments
        ///
        /// * `criteria` is the activity that will be reported.
        ///
        pub fn details(&self, criteria: &ActivityCriteria) -> String {
            let mut report = ReportSheet::new(vec![layout!(>), layout!(<)]);
            report.add_row(vec![text!("Activity:"), text!(criteria.name())]);
            for (label, value) in criteria.describe() {
                report.add_row(vec![text!(format!("{}:", label)), text!(value)]);
            }
            report.to_string()
        }
    }
}

pub mod csv {
    //! The activities CSV based reporting implementation.
    use super::*;
    extern crate csv as csv_lib;

    #[derive(Debug, Default)]
    pub struct Report;
    impl Report {
        /// Generates the activities CSV report.
        ///
        /// # Arguments
        ///
        /// * `catalog` holds the activities that will be reported.
        ///
        pub fn generate(&self, catalog: &ActivityCatalog) -> String {
            let mut writer = csv_lib::Writer::from_writer(vec![]);
            csv_write_record!(
                writer,
                &["name", "temp_min", "temp_max", "rain", "wind_min", "wind_max", "start", "end"]
            );
            for criteria in catalog.iter() {
                let [start, end] = criteria.time_range().as_strings();
                csv_write_record!(
                    writer,
                    &[
                        criteria.name().to_string(),
                        criteria.temperature_min().to_string(),
                        criteria.temperature_max().to_string(),
                        criteria.max_rain().to_string(),
                        criteria.wind_min().to_string(),
                        criteria.wind_max().to_string(),
                        start,
                        end,
                    ]
                );
            }
            csv_to_string(writer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> ActivityCatalog {
        let mut catalog = ActivityCatalog::default();
        let jogging = ActivityCriteria::builder("jogging")
            .temperature(10, 25)
            .max_rain(0.5)
            .wind(0.0, 13.0)
            .time_range("06:00", "09:00")
            .build()
            .unwrap();
        catalog.insert(jogging);
        catalog
    }

    #[test]
    fn text_report() {
        let testcase = text::Report.generate(&catalog());
        let rows = testcase.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2], "walking           18-30 °C     0 mm  0-10 km/h    All Day");
        assert_eq!(rows[3], "jogging           10-25 °C   0.5 mm  0-13 km/h 06:00 to 09:00");
        let testcase = text::Report.details(catalog().get("jogging").unwrap());
        let rows = testcase.lines().collect::<Vec<_>>();
        assert_eq!(rows[0], "         Activity: jogging");
        assert_eq!(rows[4], "       Time Range: 06:00 to 09:00");
    }

    #[test]
    fn csv_report() {
        let testcase = csv::Report.generate(&catalog());
        let rows = testcase.lines().collect::<Vec<_>>();
        assert_eq!(rows[0], "name,temp_min,temp_max,rain,wind_min,wind_max,start,end");
        assert_eq!(rows[1], "walking,18,30,0,0,10,00:00,23:59");
        assert_eq!(rows[2], "jogging,10,25,0.5,0,13,06:00,09:00");
    }
}
