use super::fsm::{RequestEvent, RequestStateMachine};
use crate::{
    Error, Result,
    config::Config,
    encoding::CropEncoder,
    model::{self, ModelRole, Regressor},
    validation::{self, PredictionRequest, RawPredictionInput, ValidationError},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_yield: f64,
    pub predicted_price: f64,
}

/// How a single request ended.
#[derive(Debug)]
pub enum PredictionOutcome {
    Predicted(PredictionResult),
    Rejected(ValidationError),
    Failed(Error),
}

/// Rounds to two decimals, ties to even on the exact binary value.
///
/// The formatter rounds the exact value rather than `value * 100`, so
/// `0.125` becomes `0.12` and large values cannot overflow while scaling.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Everything a request needs, built once at startup and never mutated.
pub struct Predictor {
    allowed_crops: Vec<String>,
    encoder: CropEncoder,
    yield_model: Arc<dyn Regressor>,
    price_model: Arc<dyn Regressor>,
}

impl Predictor {
    pub fn new(
        allowed_crops: Vec<String>,
        yield_model: Arc<dyn Regressor>,
        price_model: Arc<dyn Regressor>,
    ) -> Self {
        let encoder = CropEncoder::fit(allowed_crops.iter().cloned());
        Self {
            allowed_crops,
            encoder,
            yield_model,
            price_model,
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        let yield_model =
            model::load_model(&config.models.yield_model_path, ModelRole::Yield).await?;
        let price_model =
            model::load_model(&config.models.price_model_path, ModelRole::Price).await?;

        let predictor = Self::new(config.crops.clone(), yield_model, price_model);
        info!(
            "Predictor ready with crops {:?}",
            predictor.encoder.classes()
        );
        Ok(predictor)
    }

    pub fn allowed_crops(&self) -> &[String] {
        &self.allowed_crops
    }

    pub fn encoder(&self) -> &CropEncoder {
        &self.encoder
    }

    /// Runs the yield model, then feeds its unrounded output to the price model.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let crop_code = self.encoder.encode(&request.crop)? as f64;

        // column order: Crop, Area, Rainfall, SoilQuality
        let yield_features = [
            crop_code,
            request.area,
            request.rainfall,
            request.soil_quality,
        ];
        let predicted_yield = self.yield_model.predict(&yield_features)?;
        finite("yield", predicted_yield)?;

        // column order: Crop, Yield
        let price_features = [crop_code, predicted_yield];
        let predicted_price = self.price_model.predict(&price_features)?;
        finite("price", predicted_price)?;

        Ok(PredictionResult {
            predicted_yield: finite("yield", round2(predicted_yield))?,
            predicted_price: finite("price", round2(predicted_price))?,
        })
    }

    pub fn handle(&self, request_id: &str, input: &RawPredictionInput) -> PredictionOutcome {
        let mut fsm = RequestStateMachine::new(request_id);

        let request = match validation::validate(input, &self.allowed_crops) {
            Ok(request) => request,
            Err(e) => {
                debug!(request_id, "Rejected input: {}", e);
                return match fsm.transition(RequestEvent::InputRejected) {
                    Ok(()) => PredictionOutcome::Rejected(e),
                    Err(fsm_err) => PredictionOutcome::Failed(fsm_err),
                };
            }
        };

        if let Err(e) = fsm.transition(RequestEvent::InputAccepted) {
            return PredictionOutcome::Failed(e);
        }

        match self.predict(&request) {
            Ok(result) => match fsm.transition(RequestEvent::PredictionCompleted) {
                Ok(()) => PredictionOutcome::Predicted(result),
                Err(e) => PredictionOutcome::Failed(e),
            },
            Err(e) => {
                warn!(request_id, "Prediction failed: {}", e);
                match fsm.transition(RequestEvent::PredictionFailed) {
                    Ok(()) => PredictionOutcome::Failed(e),
                    Err(fsm_err) => PredictionOutcome::Failed(fsm_err),
                }
            }
        }
    }
}

fn finite(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::model(format!("{} model returned {}", what, value)))
    }
}
