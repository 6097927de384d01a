use crate::error::Result;
use crate::models::{Month, Observation};
use crate::readers::{LoadReport, ObservationReader};
use std::collections::BTreeSet;
use std::path::Path;

/// Read-only table of cleaned observations.
///
/// Built once at startup and never mutated, so it can be shared between
/// request handlers behind an `Arc` without locking. Queries return rows in
/// input order; a query with no matches returns an empty vector.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    observations: Vec<Observation>,
    report: LoadReport,
}

impl DatasetStore {
    /// Load and clean the dataset at `path` with the default reader
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(&ObservationReader::new(), path)
    }

    pub fn load_with(reader: &ObservationReader, path: &Path) -> Result<Self> {
        let (observations, report) = reader.read_observations(path)?;
        Ok(Self {
            observations,
            report,
        })
    }

    /// Store over already-cleaned observations
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let missing_readings = observations
            .iter()
            .map(|o| usize::from(o.temperature.is_none()) + usize::from(o.precipitation.is_none()))
            .sum();
        let report = LoadReport {
            rows_read: observations.len(),
            rows_kept: observations.len(),
            rows_missing_coordinates: 0,
            missing_readings,
        };
        Self {
            observations,
            report,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn filter_by_month(&self, month: Month) -> Vec<Observation> {
        self.observations
            .iter()
            .filter(|o| o.month == month)
            .cloned()
            .collect()
    }

    pub fn filter_by_country(&self, country: &str) -> Vec<Observation> {
        self.observations
            .iter()
            .filter(|o| o.country == country)
            .cloned()
            .collect()
    }

    pub fn filter_by_country_and_month(&self, country: &str, month: Month) -> Vec<Observation> {
        self.observations
            .iter()
            .filter(|o| o.matches(country, month))
            .cloned()
            .collect()
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.observations.iter().any(|o| o.country == country)
    }

    /// Countries present in the table, sorted
    pub fn distinct_countries(&self) -> BTreeSet<String> {
        self.observations
            .iter()
            .map(|o| o.country.clone())
            .collect()
    }

    /// Months present in the table, January first
    pub fn distinct_months(&self) -> BTreeSet<Month> {
        self.observations.iter().map(|o| o.month).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_store() -> DatasetStore {
        DatasetStore::from_observations(vec![
            Observation::new("Chile", Month::JANUARY, 20.0, 10.0, -33.4, -70.6),
            Observation::new("Peru", Month::MARCH, 24.0, 80.0, -12.0, -77.0),
            Observation::new("Chile", Month::MARCH, 18.0, 12.0, -33.4, -70.6),
            Observation::new("Chile", Month::JANUARY, 22.0, 14.0, -33.4, -70.6),
        ])
    }

    #[test]
    fn test_filter_by_month_keeps_input_order() {
        let store = sample_store();
        let march = store.filter_by_month(Month::MARCH);

        assert_eq!(march.len(), 2);
        assert_eq!(march[0].country, "Peru");
        assert_eq!(march[1].country, "Chile");
        assert!(store.filter_by_month(Month::JUNE).is_empty());
    }

    #[test]
    fn test_filter_by_country_and_month() {
        let store = sample_store();
        let rows = store.filter_by_country_and_month("Chile", Month::JANUARY);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].temperature, Some(20.0));
        assert_eq!(rows[1].temperature, Some(22.0));
        assert!(store
            .filter_by_country_and_month("Peru", Month::JANUARY)
            .is_empty());
        assert!(store
            .filter_by_country_and_month("Atlantis", Month::MARCH)
            .is_empty());
    }

    #[test]
    fn test_filter_by_country() {
        let store = sample_store();
        assert_eq!(store.filter_by_country("Chile").len(), 3);
        assert!(store.filter_by_country("chile").is_empty());
        assert!(store.contains_country("Peru"));
    }

    #[test]
    fn test_distinct_values() {
        let store = sample_store();

        let countries: Vec<String> = store.distinct_countries().into_iter().collect();
        assert_eq!(countries, vec!["Chile".to_string(), "Peru".to_string()]);

        let months: Vec<Month> = store.distinct_months().into_iter().collect();
        assert_eq!(months, vec![Month::JANUARY, Month::MARCH]);
    }

    #[test]
    fn test_empty_store() {
        let store = DatasetStore::default();
        assert!(store.is_empty());
        assert!(store.distinct_countries().is_empty());
        assert!(store.filter_by_month(Month::MAY).is_empty());
    }
}
