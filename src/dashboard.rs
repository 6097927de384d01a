use crate::analyzers::{ClimateAnalyzer, CountryProfile, DatasetSummary, MapPoint, RankOrder};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::{ClimateVariable, Month, Observation, Phenomenon, PhenomenonModel};
use crate::processors::{EstimationResult, EventProbabilityEstimator};
use crate::readers::{ArtifactReader, ObservationReader};
use crate::store::DatasetStore;
use crate::utils::progress::ProgressReporter;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Loaded dataset, estimator and analyzer.
///
/// Built once with [`ClimateDashboard::load`]; every query afterwards is a
/// pure in-memory computation over immutable state.
#[derive(Debug, Clone)]
pub struct ClimateDashboard {
    store: Arc<DatasetStore>,
    estimator: EventProbabilityEstimator,
    top_n: usize,
}

impl ClimateDashboard {
    /// Read the dataset and the four model artifacts concurrently and wire them.
    ///
    /// Any failure aborts the whole load.
    pub async fn load(config: &DashboardConfig, progress: Option<&ProgressReporter>) -> Result<Self> {
        if let Some(p) = progress {
            p.set_message("Loading dataset and model artifacts...");
        }

        let dataset_path = config.dataset.path.clone();
        let reader = ObservationReader::with_delimiter(config.dataset.delimiter_byte()?);
        let store_handle: JoinHandle<Result<DatasetStore>> =
            tokio::task::spawn_blocking(move || DatasetStore::load_with(&reader, &dataset_path));

        let rain_handle = spawn_model_load(
            Phenomenon::Rain,
            config.artifacts.rain_scaler.clone(),
            config.artifacts.rain_model.clone(),
        );
        let heat_handle = spawn_model_load(
            Phenomenon::Heat,
            config.artifacts.heat_scaler.clone(),
            config.artifacts.heat_model.clone(),
        );

        let (store, rain, heat) = tokio::try_join!(store_handle, rain_handle, heat_handle)?;
        let store = Arc::new(store?);

        let dashboard = Self::from_parts(store, rain?, heat?, config.top_n)?;

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Loaded {} observations from {} countries",
                dashboard.store.len(),
                dashboard.store.distinct_countries().len()
            ));
        }
        info!(
            "Dashboard ready: {}",
            dashboard.store.load_report().summary()
        );

        Ok(dashboard)
    }

    /// Wire already-loaded components
    pub fn from_parts(
        store: Arc<DatasetStore>,
        rain: PhenomenonModel,
        heat: PhenomenonModel,
        top_n: usize,
    ) -> Result<Self> {
        let estimator = EventProbabilityEstimator::new(Arc::clone(&store), rain, heat)?;
        Ok(Self {
            store,
            estimator,
            top_n,
        })
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn estimator(&self) -> &EventProbabilityEstimator {
        &self.estimator
    }

    pub fn analyzer(&self) -> ClimateAnalyzer {
        ClimateAnalyzer::new()
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn summary(&self) -> Option<DatasetSummary> {
        self.analyzer().summary(&self.store)
    }

    pub fn ranking(&self, variable: ClimateVariable, order: RankOrder) -> Vec<Observation> {
        self.analyzer()
            .top_n(&self.store, variable, order, self.top_n)
    }

    pub fn map_points(&self, month: Month, variable: ClimateVariable) -> Vec<MapPoint> {
        self.analyzer().map_points(&self.store, month, variable)
    }

    pub fn country_profile(&self, country: &str) -> Option<CountryProfile> {
        self.analyzer().country_profile(&self.store, country)
    }

    pub fn estimate(&self, country: &str, month: Month) -> EstimationResult {
        self.estimator.estimate(country, month)
    }
}

fn spawn_model_load(
    phenomenon: Phenomenon,
    scaler_path: PathBuf,
    model_path: PathBuf,
) -> JoinHandle<Result<PhenomenonModel>> {
    tokio::task::spawn_blocking(move || {
        ArtifactReader::new().read_phenomenon_model(phenomenon, &scaler_path, &model_path)
    })
}
