use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `features` stays untyped so that falsy values reach the empty-request check.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub features: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
