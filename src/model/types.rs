use serde::{Deserialize, Serialize};

/// A fitted regressor as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

/// Random forests average their trees, boosted ensembles add them to `base_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub feature_names: Vec<String>,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Mean,
    Sum,
}

/// Nodes are stored flat; node 0 is the root and children always come after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Which slot of the pipeline a model fills, and the columns it was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Yield,
    Price,
}

pub const YIELD_FEATURES: [&str; 4] = ["Crop", "Area", "Rainfall", "SoilQuality"];
pub const PRICE_FEATURES: [&str; 2] = ["Crop", "Yield"];

impl ModelRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yield => "yield",
            Self::Price => "price",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Yield => &YIELD_FEATURES,
            Self::Price => &PRICE_FEATURES,
        }
    }
}
