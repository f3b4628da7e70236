//! Regression models behind the prediction endpoint.
//!
//! Models are exported from training as self-describing JSON or YAML
//! artifacts and loaded once at startup into [`ModelRegistry`]. After that they
//! are shared read-only through `Arc<dyn Predictor>` handles.

mod artifact;
mod linear;
mod tree;

pub use artifact::{ModelArtifact, ModelKind};
pub use linear::LinearModel;
pub use tree::{Aggregation, TreeEnsemble, TreeNode};

use crate::{Result, config::ModelsConfig, schema::OrderedFeatureVector};
use std::{path::Path, sync::Arc};
use tracing::info;

/// A trained model that maps one schema-ordered row to one scalar.
pub trait Predictor: Send + Sync {
    fn predict(&self, row: &OrderedFeatureVector) -> Result<f64>;
}

/// The two strength models, loaded once per process.
#[derive(Clone)]
pub struct ModelRegistry {
    pub compressive: Arc<dyn Predictor>,
    pub tensile: Arc<dyn Predictor>,
}

impl ModelRegistry {
    pub fn new(compressive: Arc<dyn Predictor>, tensile: Arc<dyn Predictor>) -> Self {
        Self {
            compressive,
            tensile,
        }
    }

    pub async fn load(config: &ModelsConfig) -> Result<Self> {
        let compressive = load_predictor("compressive", &config.compressive_path).await?;
        let tensile = load_predictor("tensile", &config.tensile_path).await?;
        Ok(Self::new(compressive, tensile))
    }
}

async fn load_predictor(label: &str, path: &str) -> Result<Arc<dyn Predictor>> {
    let artifact = ModelArtifact::from_file(Path::new(path)).await?;
    info!(
        "Loaded {} model from {} ({})",
        label,
        path,
        artifact.describe()
    );
    Ok(artifact.into_predictor())
}
