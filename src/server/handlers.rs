use super::types::{ErrorResponse, PredictRequest};
use crate::{
    Error,
    config::ErrorStatusPolicy,
    prediction::{PredictionResult, PredictionService},
    schema::FeatureSchema,
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};
use uuid::Uuid;

pub const LIVENESS_MESSAGE: &str = "ML API is Running Successfully 🚀";

#[derive(Clone)]
pub struct AppState {
    pub schema: FeatureSchema,
    pub predictions: PredictionService,
    pub error_status: ErrorStatusPolicy,
}

impl AppState {
    pub fn new(predictions: PredictionService, error_status: ErrorStatusPolicy) -> Self {
        Self {
            schema: FeatureSchema::canonical(),
            predictions,
            error_status,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn home() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request {}: {}", request_id, rejection.body_text());
        (
            rejection_status(state.error_status, &rejection),
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    let result = state
        .schema
        .order_value(request.features.as_ref())
        .and_then(|vector| state.predictions.predict(&vector));

    match result {
        Ok(prediction) => {
            info!(
                "Request {} predicted compressive={} tensile={}",
                request_id, prediction.compressive_strength, prediction.tensile_strength
            );
            Ok(Json(prediction))
        }
        Err(e) => {
            let status = status_for(state.error_status, &e);
            if e.is_validation() {
                warn!("Request {} failed validation: {}", request_id, e);
            } else {
                error!("Request {} failed: {}", request_id, e);
            }
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// HTTP status for a body axum could not extract. `strict` keeps axum's 4xx.
pub fn rejection_status(policy: ErrorStatusPolicy, rejection: &JsonRejection) -> StatusCode {
    match policy {
        ErrorStatusPolicy::Legacy => StatusCode::OK,
        ErrorStatusPolicy::Strict => rejection.status(),
    }
}

/// HTTP status for a `/predict` failure under the given policy.
pub fn status_for(policy: ErrorStatusPolicy, error: &Error) -> StatusCode {
    match (policy, error) {
        (_, Error::EmptyRequest) => StatusCode::BAD_REQUEST,
        (ErrorStatusPolicy::Legacy, _) => StatusCode::OK,
        (ErrorStatusPolicy::Strict, e) if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        (ErrorStatusPolicy::Strict, _) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
