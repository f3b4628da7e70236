pub mod handlers;
mod types;

pub use types::{ErrorResponse, PredictRequest};

use crate::{
    Result, config::Config, model::ModelRegistry, prediction::PredictionService,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Models are loaded once and shared read-only by every request
    let registry = ModelRegistry::load(&config.models).await?;

    let app_state = AppState::new(
        PredictionService::from_registry(registry),
        config.server.error_status,
    );
    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} (error status policy: {:?})",
        addr, config.server.error_status
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
