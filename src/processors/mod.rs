pub mod event_estimator;
pub mod feature_aggregator;

pub use event_estimator::{
    EstimationRequest, EstimationResult, EventProbabilities, EventProbabilityEstimator,
};
pub use feature_aggregator::{mean_of, mean_precipitation, mean_temperature};
