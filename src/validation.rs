use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four form fields exactly as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPredictionInput {
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub rainfall: Option<String>,
    #[serde(default)]
    pub soil_quality: Option<String>,
}

impl RawPredictionInput {
    /// Builds the input from decoded form pairs. Repeated keys keep their
    /// first value and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut input = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "crop" => &mut input.crop,
                "area" => &mut input.area,
                "rainfall" => &mut input.rainfall,
                "soil_quality" => &mut input.soil_quality,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        input
    }
}

/// Input that has passed every rule and may be handed to the models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub crop: String,
    pub area: f64,
    pub rainfall: f64,
    pub soil_quality: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid crop. Allowed values: {}", .allowed.join(", "))]
    InvalidCrop { allowed: Vec<String> },

    #[error("Area, rainfall, and soil quality must be numeric values.")]
    NotNumeric,

    #[error("Ensure area, rainfall, and soil quality are positive numbers.")]
    OutOfRange,
}

/// Applies crop membership, numeric parsing and range checks in that order.
/// The first failing rule decides the error.
pub fn validate(
    input: &RawPredictionInput,
    allowed_crops: &[String],
) -> Result<PredictionRequest, ValidationError> {
    let crop = match input.crop.as_deref() {
        Some(crop) if allowed_crops.iter().any(|allowed| allowed == crop) => crop,
        _ => {
            return Err(ValidationError::InvalidCrop {
                allowed: allowed_crops.to_vec(),
            });
        }
    };

    let area = parse_number(input.area.as_deref())?;
    let rainfall = parse_number(input.rainfall.as_deref())?;
    let soil_quality = parse_number(input.soil_quality.as_deref())?;

    // soil quality may be zero, area and rainfall may not; NaN fails every comparison
    let in_range = area > 0.0 && rainfall > 0.0 && soil_quality >= 0.0;
    if !in_range {
        return Err(ValidationError::OutOfRange);
    }

    Ok(PredictionRequest {
        crop: crop.to_string(),
        area,
        rainfall,
        soil_quality,
    })
}

fn parse_number(raw: Option<&str>) -> Result<f64, ValidationError> {
    let text = raw.ok_or(ValidationError::NotNumeric)?.trim();
    strip_digit_separators(text)
        .ok_or(ValidationError::NotNumeric)?
        .parse::<f64>()
        .map_err(|_| ValidationError::NotNumeric)
}

/// Drops `_` separators, which are only allowed between two digits (`1_000`).
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut digits = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c != '_' {
            digits.push(c);
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(digits)
}
