use super::Predictor;
use crate::{Error, Result, schema::OrderedFeatureVector};
use serde::{Deserialize, Serialize};

/// Decision tree node. A split sends a row left when
/// `row[feature] <= threshold` and right otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        Self::Leaf { value }
    }

    pub fn split(feature: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        Self::Split {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn evaluate(&self, values: &[f64]) -> Result<f64> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { value } => return Ok(*value),
                Self::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = values.get(*feature).ok_or_else(|| {
                        Error::prediction(format!(
                            "split on feature {} but row has {} features",
                            feature,
                            values.len()
                        ))
                    })?;
                    node = if *x <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        match self {
            Self::Leaf { value } if !value.is_finite() => {
                Err("leaf value must be finite".to_string())
            }
            Self::Leaf { .. } => Ok(()),
            Self::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(format!(
                        "splits on feature {}, but only {} features exist",
                        feature, n_features
                    ));
                }
                if threshold.is_nan() {
                    return Err("split threshold must not be NaN".to_string());
                }
                left.validate(n_features)?;
                right.validate(n_features)
            }
        }
    }
}

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of tree outputs.
    #[default]
    Mean,
    /// Gradient boosting: sum of (already scaled) tree outputs.
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<TreeNode>,
}

impl TreeEnsemble {
    pub fn new(aggregation: Aggregation, base_score: f64, trees: Vec<TreeNode>) -> Self {
        Self {
            aggregation,
            base_score,
            trees,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub(crate) fn validate(&self, n_features: usize) -> Result<()> {
        if self.trees.is_empty() {
            return Err(Error::model("tree ensemble contains no trees"));
        }
        if !self.base_score.is_finite() {
            return Err(Error::model("tree ensemble base_score must be finite"));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|reason| Error::model(format!("tree {}: {}", idx, reason)))?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, row: &OrderedFeatureVector) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(Error::prediction("tree ensemble contains no trees"));
        }

        let values = row.values();
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(values)?;
        }

        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + combined)
    }
}
