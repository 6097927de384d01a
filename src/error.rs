use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unrecognized month label: '{0}'")]
    UnknownMonth(String),

    #[error("Failed to load artifact {path}: {message}")]
    ArtifactLoad { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DashboardError {
    pub fn artifact(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DashboardError::ArtifactLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error originates from reading the observation dataset
    pub fn is_data_load_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Io(_)
                | DashboardError::Csv(_)
                | DashboardError::MissingColumn(_)
                | DashboardError::InvalidFormat(_)
                | DashboardError::InvalidCoordinate(_)
                | DashboardError::Validation(_)
                | DashboardError::UnknownMonth(_)
        )
    }

    /// Whether this error originates from a model or scaler artifact
    pub fn is_artifact_load_error(&self) -> bool {
        matches!(
            self,
            DashboardError::ArtifactLoad { .. } | DashboardError::Json(_)
        )
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
