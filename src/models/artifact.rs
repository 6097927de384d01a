use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Normalization fitted at training time, applied to a raw feature before scoring
pub trait ScalingTransform: Send + Sync {
    fn transform(&self, raw: f64) -> f64;
}

/// Fitted binary classifier producing the class-1 probability
pub trait ProbabilityModel: Send + Sync {
    fn predict_probability(&self, normalized: f64) -> f64;
}

impl<F> ScalingTransform for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn transform(&self, raw: f64) -> f64 {
        self(raw)
    }
}

impl<F> ProbabilityModel for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn predict_probability(&self, normalized: f64) -> f64 {
        self(normalized)
    }
}

/// Standardization with a single fitted feature: `(x - mean) / scale`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: f64,
    pub scale: f64,
}

impl StandardScaler {
    pub fn new(mean: f64, scale: f64) -> Result<Self> {
        if !mean.is_finite() || !scale.is_finite() {
            return Err(DashboardError::InvalidFormat(format!(
                "Scaler parameters must be finite (mean={}, scale={})",
                mean, scale
            )));
        }
        if scale == 0.0 {
            return Err(DashboardError::InvalidFormat(
                "Scaler scale must be non-zero".to_string(),
            ));
        }
        Ok(Self { mean, scale })
    }
}

impl ScalingTransform for StandardScaler {
    fn transform(&self, raw: f64) -> f64 {
        (raw - self.mean) / self.scale
    }
}

/// Affine rescaling: `x * factor + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScaler {
    pub factor: f64,
    pub offset: f64,
}

impl LinearScaler {
    pub fn new(factor: f64, offset: f64) -> Result<Self> {
        if !factor.is_finite() || !offset.is_finite() {
            return Err(DashboardError::InvalidFormat(format!(
                "Scaler parameters must be finite (factor={}, offset={})",
                factor, offset
            )));
        }
        Ok(Self { factor, offset })
    }
}

impl ScalingTransform for LinearScaler {
    fn transform(&self, raw: f64) -> f64 {
        raw * self.factor + self.offset
    }
}

/// Single-feature logistic regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficient: f64,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficient: f64, intercept: f64) -> Result<Self> {
        if !coefficient.is_finite() || !intercept.is_finite() {
            return Err(DashboardError::InvalidFormat(format!(
                "Model parameters must be finite (coefficient={}, intercept={})",
                coefficient, intercept
            )));
        }
        Ok(Self {
            coefficient,
            intercept,
        })
    }
}

impl ProbabilityModel for LogisticModel {
    fn predict_probability(&self, normalized: f64) -> f64 {
        sigmoid(self.coefficient * normalized + self.intercept)
    }
}

/// Logistic function, evaluated without overflowing `exp` for large |z|
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
