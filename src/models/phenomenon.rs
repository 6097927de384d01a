use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::models::{ClimateVariable, Observation, ProbabilityModel, ScalingTransform};
use crate::processors::feature_aggregator;

/// Extreme-event type tracked by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenomenon {
    /// Abundant rainfall, scored from mean precipitation
    Rain,
    /// High temperature, scored from mean temperature
    Heat,
}

impl Phenomenon {
    pub fn variable(&self) -> ClimateVariable {
        match self {
            Phenomenon::Rain => ClimateVariable::Precipitation,
            Phenomenon::Heat => ClimateVariable::Temperature,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phenomenon::Rain => "Abundant rainfall",
            Phenomenon::Heat => "High temperature",
        }
    }

    /// Aggregated classifier input for this phenomenon, `None` for an empty row set
    pub fn feature(&self, rows: &[Observation]) -> Option<f64> {
        match self {
            Phenomenon::Rain => feature_aggregator::mean_precipitation(rows),
            Phenomenon::Heat => feature_aggregator::mean_temperature(rows),
        }
    }
}

impl fmt::Display for Phenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A fitted scaler and classifier bound to the phenomenon they were trained for.
///
/// Scoring always goes feature → this scaler → this classifier, so a scaler
/// can only ever see the feature of its own phenomenon.
#[derive(Clone)]
pub struct PhenomenonModel {
    phenomenon: Phenomenon,
    scaler: Arc<dyn ScalingTransform>,
    model: Arc<dyn ProbabilityModel>,
}

impl PhenomenonModel {
    pub fn new(
        phenomenon: Phenomenon,
        scaler: impl ScalingTransform + 'static,
        model: impl ProbabilityModel + 'static,
    ) -> Self {
        Self {
            phenomenon,
            scaler: Arc::new(scaler),
            model: Arc::new(model),
        }
    }

    pub fn from_shared(
        phenomenon: Phenomenon,
        scaler: Arc<dyn ScalingTransform>,
        model: Arc<dyn ProbabilityModel>,
    ) -> Self {
        Self {
            phenomenon,
            scaler,
            model,
        }
    }

    pub fn phenomenon(&self) -> Phenomenon {
        self.phenomenon
    }

    /// Scale a raw feature value and score it
    pub fn probability(&self, raw_feature: f64) -> f64 {
        self.model
            .predict_probability(self.scaler.transform(raw_feature))
    }

    /// Aggregate `rows` into this phenomenon's feature, then score it.
    ///
    /// Returns `(feature, probability)`, or `None` for an empty row set.
    pub fn score(&self, rows: &[Observation]) -> Option<(f64, f64)> {
        let feature = self.phenomenon.feature(rows)?;
        Some((feature, self.probability(feature)))
    }
}

impl fmt::Debug for PhenomenonModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhenomenonModel")
            .field("phenomenon", &self.phenomenon)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LogisticModel, Month, StandardScaler};

    #[test]
    fn test_phenomenon_feature_selection() {
        let rows = vec![
            Observation::new("X", Month::JANUARY, 20.0, 10.0, 0.0, 0.0),
            Observation::new("X", Month::JANUARY, 30.0, 20.0, 0.0, 0.0),
        ];

        assert_eq!(Phenomenon::Rain.feature(&rows), Some(15.0));
        assert_eq!(Phenomenon::Heat.feature(&rows), Some(25.0));
        assert_eq!(Phenomenon::Rain.feature(&[]), None);
        assert_eq!(Phenomenon::Heat.variable(), ClimateVariable::Temperature);
    }

    #[test]
    fn test_model_pipeline() {
        let model = PhenomenonModel::new(
            Phenomenon::Rain,
            StandardScaler::new(100.0, 50.0).unwrap(),
            LogisticModel::new(1.0, 0.0).unwrap(),
        );

        assert_eq!(model.phenomenon(), Phenomenon::Rain);
        assert_eq!(model.probability(100.0), 0.5);
        assert!(model.probability(300.0) > 0.5);
    }
}
