use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Message returned when a request carries no usable `features` object.
pub const EMPTY_REQUEST_MESSAGE: &str = "Missing 'features' in request body";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("{}", EMPTY_REQUEST_MESSAGE)]
    EmptyRequest,

    #[error("Missing feature(s): {}", quote_all(.names))]
    MissingFeature { names: Vec<String> },

    #[error("Feature '{name}' must be a number, got {found}")]
    InvalidFeature { name: String, found: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn missing(names: Vec<String>) -> Self {
        Self::MissingFeature { names }
    }

    /// True for errors caused by the caller's feature payload.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyRequest
                | Self::MissingFeature { .. }
                | Self::InvalidFeature { .. }
                | Self::InvalidRequest(_)
        )
    }
}

fn quote_all(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
