use mockall::mock;
use std::sync::{Arc, Mutex};
use strength_api::{Error, Result, model::Predictor, schema::OrderedFeatureVector};

mock! {
    pub Model {}

    impl Predictor for Model {
        fn predict(&self, row: &OrderedFeatureVector) -> Result<f64>;
    }
}

/// Predictor that always returns the same value
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn predict(&self, _row: &OrderedFeatureVector) -> Result<f64> {
        Ok(self.0)
    }
}

/// Predictor that always fails with the given message
#[derive(Debug, Clone)]
pub struct FailingPredictor(pub String);

impl Predictor for FailingPredictor {
    fn predict(&self, _row: &OrderedFeatureVector) -> Result<f64> {
        Err(Error::prediction(self.0.clone()))
    }
}

/// Predictor that sums the row and keeps every row it was given
#[derive(Debug, Default)]
pub struct RecordingPredictor {
    pub rows: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl RecordingPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_rows(&self) -> Vec<Vec<f64>> {
        self.rows.lock().unwrap().clone()
    }
}

impl Predictor for RecordingPredictor {
    fn predict(&self, row: &OrderedFeatureVector) -> Result<f64> {
        self.rows.lock().unwrap().push(row.values().to_vec());
        Ok(row.values().iter().sum())
    }
}
