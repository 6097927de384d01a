use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Month;
use crate::utils::round_to;
use crate::utils::constants::VALUE_DECIMALS;

/// One cleaned row of the climate dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Observation {
    #[validate(length(min = 1))]
    pub country: String,

    pub month: Month,

    /// Mean temperature in °C, `None` when the cell was blank
    pub temperature: Option<f64>,

    /// Precipitation in mm, `None` when the cell was blank
    pub precipitation: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Observation {
    /// Build a fully measured observation, rounding values to the stored precision
    pub fn new(
        country: impl Into<String>,
        month: Month,
        temperature: f64,
        precipitation: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self::with_readings(
            country,
            month,
            Some(temperature),
            Some(precipitation),
            latitude,
            longitude,
        )
    }

    /// Build an observation whose measurements may be absent
    pub fn with_readings(
        country: impl Into<String>,
        month: Month,
        temperature: Option<f64>,
        precipitation: Option<f64>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let stored = |v: f64| round_to(v, VALUE_DECIMALS);
        Self {
            country: country.into(),
            month,
            temperature: temperature.map(stored),
            precipitation: precipitation.map(stored),
            latitude,
            longitude,
        }
    }

    pub fn value(&self, variable: ClimateVariable) -> Option<f64> {
        match variable {
            ClimateVariable::Precipitation => self.precipitation,
            ClimateVariable::Temperature => self.temperature,
        }
    }

    pub fn matches(&self, country: &str, month: Month) -> bool {
        self.month == month && self.country == country
    }
}

/// Measured variable of an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateVariable {
    Precipitation,
    Temperature,
}

impl ClimateVariable {
    pub fn display_name(&self) -> &'static str {
        match self {
            ClimateVariable::Precipitation => "Precipitation",
            ClimateVariable::Temperature => "Temperature",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            ClimateVariable::Precipitation => "mm",
            ClimateVariable::Temperature => "°C",
        }
    }
}

impl std::fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ClimateVariable {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "precipitation" | "precipitaciones" | "rain" => Ok(ClimateVariable::Precipitation),
            "temperature" | "temperatura" | "temp" => Ok(ClimateVariable::Temperature),
            other => Err(format!("unknown variable '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_rounds_values() {
        let obs = Observation::new("Chile", Month::MAY, 12.34567, 80.00049, -33.4, -70.6);

        assert_eq!(obs.temperature, Some(12.346));
        assert_eq!(obs.precipitation, Some(80.0));
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn test_missing_reading_stays_absent() {
        let obs = Observation::with_readings("Chile", Month::MAY, None, Some(4.56789), -33.4, -70.6);

        assert_eq!(obs.value(ClimateVariable::Temperature), None);
        assert_eq!(obs.value(ClimateVariable::Precipitation), Some(4.568));
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        let obs = Observation::new("Nowhere", Month::MAY, 10.0, 10.0, 91.0, 0.0);
        assert!(obs.validate().is_err());

        let obs = Observation::new("Nowhere", Month::MAY, 10.0, 10.0, 0.0, -180.5);
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_empty_country_rejected() {
        let obs = Observation::new("", Month::MAY, 10.0, 10.0, 0.0, 0.0);
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_variable_parsing() {
        assert_eq!(
            "Precipitaciones".parse::<ClimateVariable>().unwrap(),
            ClimateVariable::Precipitation
        );
        assert_eq!(
            "temperature".parse::<ClimateVariable>().unwrap(),
            ClimateVariable::Temperature
        );
        assert!("wind".parse::<ClimateVariable>().is_err());
    }
}
