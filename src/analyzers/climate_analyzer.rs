use crate::models::{ClimateVariable, Month, Observation};
use crate::store::DatasetStore;
use serde::Serialize;

/// An extreme value and the country where it was observed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub value: f64,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub total_countries: usize,
    /// `None` when no row has a reading for the variable
    pub max_precipitation: Option<Extreme>,
    pub min_precipitation: Option<Extreme>,
    pub max_temperature: Option<Extreme>,
    pub min_temperature: Option<Extreme>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProfile {
    pub country: String,
    pub max_precipitation: Option<f64>,
    pub min_precipitation: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    /// Rows of the country, used to place it on the map
    pub observations: Vec<Observation>,
}

/// A located value for the month map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Highest,
    Lowest,
}

pub struct ClimateAnalyzer;

impl ClimateAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Whole-table metrics; `None` for an empty store
    pub fn summary(&self, store: &DatasetStore) -> Option<DatasetSummary> {
        let records = store.observations();
        if records.is_empty() {
            return None;
        }

        use ClimateVariable::{Precipitation, Temperature};
        Some(DatasetSummary {
            total_records: records.len(),
            total_countries: store.distinct_countries().len(),
            max_precipitation: extreme(records, Precipitation, RankOrder::Highest),
            min_precipitation: extreme(records, Precipitation, RankOrder::Lowest),
            max_temperature: extreme(records, Temperature, RankOrder::Highest),
            min_temperature: extreme(records, Temperature, RankOrder::Lowest),
        })
    }

    /// The `n` rows with the highest or lowest value of `variable`.
    ///
    /// Rows are ranked individually, so a country can appear more than once.
    /// Rows without a reading for `variable` are not ranked.
    pub fn top_n(
        &self,
        store: &DatasetStore,
        variable: ClimateVariable,
        order: RankOrder,
        n: usize,
    ) -> Vec<Observation> {
        let mut ranked: Vec<(&Observation, f64)> = store
            .observations()
            .iter()
            .filter_map(|o| o.value(variable).map(|v| (o, v)))
            .collect();

        // Stable sort: ties keep input order
        ranked.sort_by(|(_, a), (_, b)| {
            let cmp = a.total_cmp(b);
            match order {
                RankOrder::Highest => cmp.reverse(),
                RankOrder::Lowest => cmp,
            }
        });

        ranked.into_iter().take(n).map(|(o, _)| o.clone()).collect()
    }

    /// Extremes for one country; `None` if the country has no rows
    pub fn country_profile(&self, store: &DatasetStore, country: &str) -> Option<CountryProfile> {
        let observations = store.filter_by_country(country);
        if observations.is_empty() {
            return None;
        }

        let precip = || observations.iter().filter_map(|o| o.precipitation);
        let temp = || observations.iter().filter_map(|o| o.temperature);

        Some(CountryProfile {
            country: country.to_string(),
            max_precipitation: precip().reduce(f64::max),
            min_precipitation: precip().reduce(f64::min),
            max_temperature: temp().reduce(f64::max),
            min_temperature: temp().reduce(f64::min),
            observations,
        })
    }

    /// Located values of `variable` for the rows of `month` that have a reading
    pub fn map_points(
        &self,
        store: &DatasetStore,
        month: Month,
        variable: ClimateVariable,
    ) -> Vec<MapPoint> {
        store
            .filter_by_month(month)
            .into_iter()
            .filter_map(|o| {
                Some(MapPoint {
                    value: o.value(variable)?,
                    latitude: o.latitude,
                    longitude: o.longitude,
                    country: o.country,
                })
            })
            .collect()
    }
}

impl Default for ClimateAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn extreme(records: &[Observation], variable: ClimateVariable, order: RankOrder) -> Option<Extreme> {
    let mut best: Option<(&Observation, f64)> = None;

    // Strict comparisons keep the first row on ties
    for record in records {
        let Some(value) = record.value(variable) else {
            continue;
        };
        let replaces = match best {
            None => true,
            Some((_, current)) => match order {
                RankOrder::Highest => value > current,
                RankOrder::Lowest => value < current,
            },
        };
        if replaces {
            best = Some((record, value));
        }
    }

    best.map(|(record, value)| Extreme {
        value,
        country: record.country.clone(),
    })
}

fn extreme_text(extreme: &Option<Extreme>, units: &str) -> String {
    match extreme {
        Some(e) => format!("{} {} ({})", e.value, units, e.country),
        None => "n/a".to_string(),
    }
}

fn reading_text(value: Option<f64>, units: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{} {}", v, units))
}

impl DatasetSummary {
    pub fn summary(&self) -> String {
        format!(
            "Countries: {}\n\
            Records: {}\n\
            Max. precipitation: {}\n\
            Min. precipitation: {}\n\
            Max. temperature: {}\n\
            Min. temperature: {}",
            self.total_countries,
            self.total_records,
            extreme_text(&self.max_precipitation, "mm"),
            extreme_text(&self.min_precipitation, "mm"),
            extreme_text(&self.max_temperature, "°C"),
            extreme_text(&self.min_temperature, "°C"),
        )
    }
}

impl CountryProfile {
    pub fn summary(&self) -> String {
        format!(
            "{} ({} records)\n\
            Precipitation: {} to {}\n\
            Temperature: {} to {}",
            self.country,
            self.observations.len(),
            reading_text(self.min_precipitation, "mm"),
            reading_text(self.max_precipitation, "mm"),
            reading_text(self.min_temperature, "°C"),
            reading_text(self.max_temperature, "°C"),
        )
    }

    /// Distinct coordinates recorded for the country, in first-seen order
    pub fn locations(&self) -> Vec<(f64, f64)> {
        let mut locations: Vec<(f64, f64)> = Vec::new();
        for o in &self.observations {
            let location = (o.latitude, o.longitude);
            if !locations.contains(&location) {
                locations.push(location);
            }
        }
        locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> DatasetStore {
        DatasetStore::from_observations(vec![
            Observation::new("Chile", Month::JANUARY, 20.0, 10.0, -33.4, -70.6),
            Observation::new("Peru", Month::JANUARY, 24.0, 80.0, -12.0, -77.0),
            Observation::new("Norway", Month::JANUARY, -5.0, 80.0, 60.4, 8.5),
            Observation::new("Chile", Month::JULY, 9.0, 90.0, -33.4, -70.6),
            Observation::new("Chile", Month::JULY, 8.0, 70.0, -36.8, -73.0),
        ])
    }

    #[test]
    fn test_summary_extremes() {
        let summary = ClimateAnalyzer::new().summary(&store()).unwrap();

        assert_eq!(summary.total_records, 5);
        assert_eq!(summary.total_countries, 3);
        assert_eq!(
            summary.max_precipitation,
            Some(Extreme {
                value: 90.0,
                country: "Chile".to_string()
            })
        );
        assert_eq!(summary.min_precipitation.as_ref().unwrap().country, "Chile");
        assert_eq!(summary.max_temperature.as_ref().unwrap().country, "Peru");
        assert_eq!(
            summary.min_temperature,
            Some(Extreme {
                value: -5.0,
                country: "Norway".to_string()
            })
        );
        assert!(summary.summary().contains("Countries: 3"));
    }

    #[test]
    fn test_summary_of_empty_store() {
        assert!(ClimateAnalyzer::new()
            .summary(&DatasetStore::default())
            .is_none());
    }

    #[test]
    fn test_top_n_rankings() {
        let analyzer = ClimateAnalyzer::new();
        let store = store();

        let wettest =
            analyzer.top_n(&store, ClimateVariable::Precipitation, RankOrder::Highest, 3);
        let values: Vec<Option<f64>> = wettest.iter().map(|o| o.precipitation).collect();
        assert_eq!(values, vec![Some(90.0), Some(80.0), Some(80.0)]);
        // Tie keeps input order
        assert_eq!(wettest[1].country, "Peru");
        assert_eq!(wettest[2].country, "Norway");

        let coldest = analyzer.top_n(&store, ClimateVariable::Temperature, RankOrder::Lowest, 2);
        assert_eq!(coldest[0].country, "Norway");
        assert_eq!(coldest[1].temperature, Some(8.0));

        assert_eq!(
            analyzer
                .top_n(&store, ClimateVariable::Temperature, RankOrder::Lowest, 10)
                .len(),
            5
        );
    }

    #[test]
    fn test_country_profile() {
        let analyzer = ClimateAnalyzer::new();
        let profile = analyzer.country_profile(&store(), "Chile").unwrap();

        assert_eq!(profile.max_precipitation, Some(90.0));
        assert_eq!(profile.min_precipitation, Some(10.0));
        assert_eq!(profile.max_temperature, Some(20.0));
        assert_eq!(profile.min_temperature, Some(8.0));
        assert_eq!(profile.observations.len(), 3);
        assert_eq!(profile.locations(), vec![(-33.4, -70.6), (-36.8, -73.0)]);

        assert!(analyzer.country_profile(&store(), "Atlantis").is_none());
    }

    #[test]
    fn test_map_points() {
        let analyzer = ClimateAnalyzer::new();
        let points = analyzer.map_points(&store(), Month::JULY, ClimateVariable::Temperature);

        assert_eq!(
            points[0],
            MapPoint {
                country: "Chile".to_string(),
                latitude: -33.4,
                longitude: -70.6,
                value: 9.0,
            }
        );
        assert_eq!(points.len(), 2);
        assert!(analyzer
            .map_points(&store(), Month::MARCH, ClimateVariable::Precipitation)
            .is_empty());
    }

    #[test]
    fn test_blank_readings_are_ignored() {
        let analyzer = ClimateAnalyzer::new();
        let store = DatasetStore::from_observations(vec![
            Observation::with_readings("Chile", Month::MAY, None, Some(30.0), -33.4, -70.6),
            Observation::with_readings("Peru", Month::MAY, Some(18.0), None, -12.0, -77.0),
        ]);

        let summary = analyzer.summary(&store).unwrap();
        assert_eq!(summary.max_temperature.as_ref().unwrap().country, "Peru");
        assert_eq!(summary.min_precipitation.as_ref().unwrap().country, "Chile");

        let hottest = analyzer.top_n(&store, ClimateVariable::Temperature, RankOrder::Highest, 10);
        assert_eq!(hottest.len(), 1);

        let points = analyzer.map_points(&store, Month::MAY, ClimateVariable::Precipitation);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].country, "Chile");

        let profile = analyzer.country_profile(&store, "Chile").unwrap();
        assert_eq!(profile.max_temperature, None);
        assert!(profile.summary().contains("Temperature: n/a to n/a"));

        let empty = DatasetStore::from_observations(vec![Observation::with_readings(
            "Chile",
            Month::MAY,
            None,
            Some(1.0),
            -33.4,
            -70.6,
        )]);
        assert_eq!(analyzer.summary(&empty).unwrap().max_temperature, None);
    }
}
