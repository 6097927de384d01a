pub mod analyzers;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod store;
pub mod utils;

pub use config::DashboardConfig;
pub use dashboard::ClimateDashboard;
pub use error::{DashboardError, Result};
pub use processors::{EstimationResult, EventProbabilities, EventProbabilityEstimator};
pub use store::DatasetStore;
