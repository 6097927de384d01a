use crate::error::{DashboardError, Result};
use crate::models::{Month, Observation, Phenomenon, PhenomenonModel};
use crate::store::DatasetStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// A (country, month) selection to estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationRequest {
    pub country: String,
    pub month: Month,
}

impl EstimationRequest {
    pub fn new(country: impl Into<String>, month: Month) -> Self {
        Self {
            country: country.into(),
            month,
        }
    }
}

/// Probabilities computed for one (country, month) slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventProbabilities {
    /// Probability of abundant rainfall, in [0, 1]
    pub rain_probability: f64,
    /// Probability of high temperature, in [0, 1]
    pub heat_probability: f64,
    pub mean_precipitation: f64,
    pub mean_temperature: f64,
    /// Number of observations aggregated into the features
    pub observations: usize,
}

impl EventProbabilities {
    pub fn probability(&self, phenomenon: Phenomenon) -> f64 {
        match phenomenon {
            Phenomenon::Rain => self.rain_probability,
            Phenomenon::Heat => self.heat_probability,
        }
    }
}

/// Outcome of an estimation.
///
/// `NoData` means the selection is absent from the historical record. It is
/// not an error and must never be shown as a 0% probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimationResult {
    Success(EventProbabilities),
    NoData,
}

impl EstimationResult {
    pub fn is_no_data(&self) -> bool {
        matches!(self, EstimationResult::NoData)
    }

    pub fn probabilities(&self) -> Option<&EventProbabilities> {
        match self {
            EstimationResult::Success(p) => Some(p),
            EstimationResult::NoData => None,
        }
    }
}

/// Scores extreme-event probabilities for (country, month) selections.
///
/// All historical readings of the slice are averaged first and the averaged
/// feature is scored once; averaging per-row probabilities would give a
/// different answer for a non-linear model.
#[derive(Debug, Clone)]
pub struct EventProbabilityEstimator {
    store: Arc<DatasetStore>,
    rain: PhenomenonModel,
    heat: PhenomenonModel,
}

impl EventProbabilityEstimator {
    pub fn new(store: Arc<DatasetStore>, rain: PhenomenonModel, heat: PhenomenonModel) -> Result<Self> {
        if rain.phenomenon() != Phenomenon::Rain {
            return Err(DashboardError::Config(format!(
                "Rain slot is bound to a {} model",
                rain.phenomenon()
            )));
        }
        if heat.phenomenon() != Phenomenon::Heat {
            return Err(DashboardError::Config(format!(
                "Heat slot is bound to a {} model",
                heat.phenomenon()
            )));
        }

        Ok(Self { store, rain, heat })
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn estimate(&self, country: &str, month: Month) -> EstimationResult {
        let rows = self.store.filter_by_country_and_month(country, month);
        if rows.is_empty() {
            debug!("No observations for {} in {}", country, month);
            return EstimationResult::NoData;
        }

        self.estimate_rows(&rows)
    }

    pub fn estimate_request(&self, request: &EstimationRequest) -> EstimationResult {
        self.estimate(&request.country, request.month)
    }

    /// Score an already-selected row set.
    ///
    /// `NoData` when either variable has no reading left in the set.
    pub fn estimate_rows(&self, rows: &[Observation]) -> EstimationResult {
        let (Some((mean_precipitation, rain)), Some((mean_temperature, heat))) =
            (self.rain.score(rows), self.heat.score(rows))
        else {
            return EstimationResult::NoData;
        };

        EstimationResult::Success(EventProbabilities {
            rain_probability: bounded(rain, Phenomenon::Rain),
            heat_probability: bounded(heat, Phenomenon::Heat),
            mean_precipitation,
            mean_temperature,
            observations: rows.len(),
        })
    }
}

fn bounded(probability: f64, phenomenon: Phenomenon) -> f64 {
    if (0.0..=1.0).contains(&probability) {
        probability
    } else {
        warn!(
            "{} model returned {} outside [0, 1], clamping",
            phenomenon, probability
        );
        probability.clamp(0.0, 1.0)
    }
}
