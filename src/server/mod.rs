pub mod handlers;
pub mod types;

use crate::{config::Config, pipeline::Predictor, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(predictor: Arc<Predictor>) -> Router {
    let index_html = handlers::render_index(predictor.allowed_crops()).into();
    let app_state = handlers::AppState {
        predictor,
        index_html,
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    // Models are loaded once; a missing artifact aborts startup here
    let predictor = Predictor::from_config(&config).await?;

    let app = router(Arc::new(predictor));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
