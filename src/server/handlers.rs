use super::types::PredictionView;
use crate::{
    pipeline::{PredictionOutcome, Predictor},
    validation::RawPredictionInput,
};
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, Json},
    Form,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

/// Fills the form template with one `<option>` per configured crop.
pub fn render_index(crops: &[String]) -> String {
    let options = crops
        .iter()
        .map(|crop| format!("        <option>{}</option>", escape_html(crop)))
        .collect::<Vec<_>>()
        .join("\n");
    INDEX_TEMPLATE.replace("{{crop_options}}", &options)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub index_html: Arc<str>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> (StatusCode, Json<PredictionView>) {
    let request_id = Uuid::new_v4().to_string();

    let Form(pairs) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!(request_id = %request_id, "Rejected form body: {}", rejection);
            return (
                rejection.status(),
                Json(PredictionView::error(rejection.body_text())),
            );
        }
    };

    let input = RawPredictionInput::from_pairs(pairs);
    info!(
        request_id = %request_id,
        "Received prediction request for crop: {:?}",
        input.crop
    );

    render(&request_id, state.predictor.handle(&request_id, &input))
}

/// The one place pipeline outcomes become user-facing messages. Every
/// outcome re-renders the page normally; only the context differs.
pub fn render(request_id: &str, outcome: PredictionOutcome) -> (StatusCode, Json<PredictionView>) {
    match outcome {
        PredictionOutcome::Predicted(result) => {
            info!(
                request_id,
                "Predicted yield {} and price {}", result.predicted_yield, result.predicted_price
            );
            (
                StatusCode::OK,
                Json(PredictionView {
                    predicted_yield: Some(result.predicted_yield),
                    predicted_price: Some(result.predicted_price),
                    error: None,
                }),
            )
        }
        PredictionOutcome::Rejected(e) => (StatusCode::OK, Json(PredictionView::error(e.to_string()))),
        PredictionOutcome::Failed(e) => {
            error!(request_id, "Failed to process prediction request: {}", e);
            (StatusCode::OK, Json(PredictionView::error(e.to_string())))
        }
    }
}
