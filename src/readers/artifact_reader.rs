use crate::error::{DashboardError, Result};
use crate::models::{
    LinearScaler, LogisticModel, Phenomenon, PhenomenonModel, ProbabilityModel, ScalingTransform,
    StandardScaler,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Parameter in either plain or scikit-learn array layout (`1.5`, `[1.5]`, `[[1.5]]`)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl Param {
    /// The single fitted value; the estimator only scores one feature
    fn single(&self, name: &str) -> Result<f64> {
        let values: Vec<f64> = match self {
            Param::Scalar(v) => vec![*v],
            Param::Vector(v) => v.clone(),
            Param::Matrix(rows) => rows.iter().flatten().copied().collect(),
        };

        match values.as_slice() {
            [value] => Ok(*value),
            _ => Err(DashboardError::InvalidFormat(format!(
                "Expected exactly one value for '{}', found {}",
                name,
                values.len()
            ))),
        }
    }
}

/// Exported form of a fitted scaler or classifier
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactSpec {
    StandardScaler {
        mean: Param,
        scale: Param,
    },
    LinearScaler {
        factor: f64,
        #[serde(default)]
        offset: f64,
    },
    LogisticRegression {
        coef: Param,
        intercept: Param,
        #[serde(default)]
        classes: Option<Vec<serde_json::Value>>,
    },
}

impl ArtifactSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ArtifactSpec::StandardScaler { .. } => "standard_scaler",
            ArtifactSpec::LinearScaler { .. } => "linear_scaler",
            ArtifactSpec::LogisticRegression { .. } => "logistic_regression",
        }
    }

    pub fn into_scaler(self) -> Result<Arc<dyn ScalingTransform>> {
        match self {
            ArtifactSpec::StandardScaler { mean, scale } => Ok(Arc::new(StandardScaler::new(
                mean.single("mean")?,
                scale.single("scale")?,
            )?)),
            ArtifactSpec::LinearScaler { factor, offset } => {
                Ok(Arc::new(LinearScaler::new(factor, offset)?))
            }
            other => Err(DashboardError::InvalidFormat(format!(
                "Expected a scaler, found '{}'",
                other.kind()
            ))),
        }
    }

    pub fn into_model(self) -> Result<Arc<dyn ProbabilityModel>> {
        match self {
            ArtifactSpec::LogisticRegression {
                coef,
                intercept,
                classes,
            } => {
                if let Some(classes) = classes {
                    if classes.len() != 2 {
                        return Err(DashboardError::InvalidFormat(format!(
                            "Expected a binary classifier, found {} classes",
                            classes.len()
                        )));
                    }
                }
                Ok(Arc::new(LogisticModel::new(
                    coef.single("coef")?,
                    intercept.single("intercept")?,
                )?))
            }
            other => Err(DashboardError::InvalidFormat(format!(
                "Expected a classifier, found '{}'",
                other.kind()
            ))),
        }
    }
}

/// Loads the fitted scaler/classifier artifacts consumed by the estimator
pub struct ArtifactReader;

impl ArtifactReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_spec(&self, path: &Path) -> Result<ArtifactSpec> {
        debug!("Reading artifact {}", path.display());
        let text = fs::read_to_string(path)
            .map_err(|e| DashboardError::artifact(path, format!("cannot read file: {}", e)))?;

        ArtifactSpec::from_json(&text).map_err(|e| DashboardError::artifact(path, e.to_string()))
    }

    pub fn read_scaler(&self, path: &Path) -> Result<Arc<dyn ScalingTransform>> {
        self.read_spec(path)?
            .into_scaler()
            .map_err(|e| DashboardError::artifact(path, e.to_string()))
    }

    pub fn read_model(&self, path: &Path) -> Result<Arc<dyn ProbabilityModel>> {
        self.read_spec(path)?
            .into_model()
            .map_err(|e| DashboardError::artifact(path, e.to_string()))
    }

    /// Read a scaler and classifier pair and bind them to `phenomenon`
    pub fn read_phenomenon_model(
        &self,
        phenomenon: Phenomenon,
        scaler_path: &Path,
        model_path: &Path,
    ) -> Result<PhenomenonModel> {
        let scaler = self.read_scaler(scaler_path)?;
        let model = self.read_model(model_path)?;
        Ok(PhenomenonModel::from_shared(phenomenon, scaler, model))
    }
}

impl Default for ArtifactReader {
    fn default() -> Self {
        Self::new()
    }
}
