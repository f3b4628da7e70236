use super::{LinearModel, Predictor, TreeEnsemble};
use crate::{Error, Result, schema::FeatureSchema};
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};
use tracing::debug;

/// Serialized form of a trained model.
///
/// ```yaml
/// kind: tree_ensemble
/// feature_names: [Alkaline_Liquid_Ratio, ...]
/// aggregation: mean
/// trees:
///   - { feature: 10, threshold: 14.0, left: { value: 31.2 }, right: { value: 38.9 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Column order the model was trained on. Checked against the schema on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn new(model: ModelKind) -> Self {
        Self {
            feature_names: Some(
                FeatureSchema::canonical()
                    .names()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            ),
            model,
        }
    }

    /// Reads and validates an artifact; the format follows the file extension.
    pub async fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading model artifact from: {}", path.display());

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::model(format!("cannot read {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let artifact = match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            other => Err(Error::model(format!(
                "unsupported model artifact extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }?;

        Ok(artifact)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(content)?;
        artifact.validate(&FeatureSchema::canonical())?;
        Ok(artifact)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let artifact: Self = serde_yaml::from_str(content)?;
        artifact.validate(&FeatureSchema::canonical())?;
        Ok(artifact)
    }

    pub fn validate(&self, schema: &FeatureSchema) -> Result<()> {
        if let Some(names) = &self.feature_names {
            if !schema.matches(names) {
                return Err(Error::model(format!(
                    "model was trained on columns {:?}, expected {:?}",
                    names,
                    schema.names()
                )));
            }
        }

        match &self.model {
            ModelKind::Linear(model) => model.validate(schema.len()),
            ModelKind::TreeEnsemble(model) => model.validate(schema.len()),
        }
    }

    pub fn describe(&self) -> String {
        match &self.model {
            ModelKind::Linear(model) => {
                format!("linear, {} coefficients", model.n_features())
            }
            ModelKind::TreeEnsemble(model) => format!(
                "tree ensemble, {} trees, {:?} aggregation, max depth {}",
                model.trees.len(),
                model.aggregation,
                model.max_depth()
            ),
        }
    }

    pub fn into_predictor(self) -> Arc<dyn Predictor> {
        match self.model {
            ModelKind::Linear(model) => Arc::new(model),
            ModelKind::TreeEnsemble(model) => Arc::new(model),
        }
    }
}
