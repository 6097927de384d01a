//! Reduces a filtered row set to the scalar features scored by the classifiers.
//!
//! Values are used as stored (already rounded at ingestion); means are not
//! re-rounded. Rows with a blank reading for a variable are left out of that
//! variable's mean only.

use crate::models::{ClimateVariable, Observation};
use crate::utils::mean;

/// Mean precipitation of `rows`, `None` when no row has a reading
pub fn mean_precipitation(rows: &[Observation]) -> Option<f64> {
    mean_of(rows, ClimateVariable::Precipitation)
}

/// Mean temperature of `rows`, `None` when no row has a reading
pub fn mean_temperature(rows: &[Observation]) -> Option<f64> {
    mean_of(rows, ClimateVariable::Temperature)
}

pub fn mean_of(rows: &[Observation], variable: ClimateVariable) -> Option<f64> {
    mean(rows.iter().filter_map(|o| o.value(variable)))
}
