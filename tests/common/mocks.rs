use crop_forecast::{Error, Result, model::Regressor};
use std::sync::{Arc, Mutex};

/// Mock regressor that records every feature row it sees
#[derive(Debug, Clone)]
pub struct RecordingRegressor {
    pub n_features: usize,
    pub output: f64,
    pub rows: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl RecordingRegressor {
    pub fn new(n_features: usize, output: f64) -> Self {
        Self {
            n_features,
            output,
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_rows(&self) -> Vec<Vec<f64>> {
        self.rows.lock().unwrap().clone()
    }
}

impl Regressor for RecordingRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        self.rows.lock().unwrap().push(features.to_vec());
        Ok(self.output)
    }
}

/// Mock regressor that always fails
#[derive(Debug, Clone)]
pub struct FailingRegressor {
    pub message: String,
}

impl FailingRegressor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Regressor for FailingRegressor {
    fn n_features(&self) -> usize {
        0
    }

    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Err(Error::model(self.message.clone()))
    }
}
