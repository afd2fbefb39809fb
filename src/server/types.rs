use serde::Serialize;

/// Context the result page is rendered from. Absent keys are omitted.
#[derive(Debug, Default, Serialize)]
pub struct PredictionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionView {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
