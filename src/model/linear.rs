use super::Predictor;
use crate::{Error, Result, schema::OrderedFeatureVector};
use serde::{Deserialize, Serialize};

/// Ordinary least squares model: `intercept + Σ coefficient_i * x_i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub(crate) fn validate(&self, n_features: usize) -> Result<()> {
        if self.coefficients.len() != n_features {
            return Err(Error::model(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                n_features
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::model("linear model parameters must be finite"));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, row: &OrderedFeatureVector) -> Result<f64> {
        let values = row.values();
        if values.len() != self.coefficients.len() {
            return Err(Error::prediction(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                values.len()
            )));
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(values)
            .map(|(coef, x)| coef * x)
            .sum();
        Ok(self.intercept + dot)
    }
}
