use crate::{
    Error, Result,
    model::{ModelRegistry, Predictor},
    schema::OrderedFeatureVector,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Compressive and tensile strength for one formulation, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub compressive_strength: f64,
    pub tensile_strength: f64,
}

/// Runs both strength models against the same row.
#[derive(Clone)]
pub struct PredictionService {
    compressive: Arc<dyn Predictor>,
    tensile: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(compressive: Arc<dyn Predictor>, tensile: Arc<dyn Predictor>) -> Self {
        Self {
            compressive,
            tensile,
        }
    }

    pub fn from_registry(registry: ModelRegistry) -> Self {
        Self::new(registry.compressive, registry.tensile)
    }

    /// Both predictions succeed together or the call fails; the row's ordering
    /// is trusted as-is.
    pub fn predict(&self, vector: &OrderedFeatureVector) -> Result<PredictionResult> {
        let compressive = invoke("compressive", self.compressive.as_ref(), vector)?;
        let tensile = invoke("tensile", self.tensile.as_ref(), vector)?;

        debug!(
            "Raw predictions: compressive={}, tensile={}",
            compressive, tensile
        );

        Ok(PredictionResult {
            compressive_strength: round2(compressive),
            tensile_strength: round2(tensile),
        })
    }
}

fn invoke(label: &str, predictor: &dyn Predictor, vector: &OrderedFeatureVector) -> Result<f64> {
    let value = predictor.predict(vector).map_err(|e| match e {
        Error::Prediction(_) => e,
        other => Error::prediction(other.to_string()),
    })?;

    if !value.is_finite() {
        return Err(Error::prediction(format!(
            "{} model returned a non-finite value ({})",
            label, value
        )));
    }
    Ok(value)
}

/// Magnitude above which an f64 has no hundredths left to round.
const ROUND2_LIMIT: f64 = (1u64 << 52) as f64 / 100.0;

/// Rounds to 2 decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= ROUND2_LIMIT {
        return value;
    }
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round2() {
        assert_eq!(round2(41.2345), 41.23);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(-1.006), -1.01);
    }

    #[test]
    fn test_round2_ties_to_even() {
        // 0.125 and 0.375 are exact in binary, so these are true ties.
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn test_round2_keeps_large_magnitudes() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert_eq!(round2(1e16), 1e16);
    }
}
