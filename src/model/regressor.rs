use super::types::{Aggregation, LinearModel, ModelArtifact, Node, Tree, TreeEnsemble};
use crate::{Error, Result};
use std::collections::HashSet;

/// Anything that turns one tabular feature row into one scalar.
#[cfg_attr(test, mockall::automock)]
pub trait Regressor: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<f64>;
}

fn check_shape(expected: usize, features: &[f64]) -> Result<()> {
    if features.len() != expected {
        return Err(Error::FeatureShape {
            expected,
            found: features.len(),
        });
    }
    Ok(())
}

impl ModelArtifact {
    pub fn feature_names(&self) -> &[String] {
        match self {
            Self::Linear(model) => &model.feature_names,
            Self::TreeEnsemble(model) => &model.feature_names,
        }
    }

    /// Structural checks run once at load time so `predict` can index freely.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let names = self.feature_names();
        if names.is_empty() {
            return Err("feature_names is empty".to_string());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(format!("duplicate feature name '{}'", dup));
        }

        match self {
            Self::Linear(model) => model.validate(),
            Self::TreeEnsemble(model) => model.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn n_features(&self) -> usize {
        self.feature_names().len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        match self {
            Self::Linear(model) => model.predict(features),
            Self::TreeEnsemble(model) => model.predict(features),
        }
    }
}

impl LinearModel {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.coefficients.len() != self.feature_names.len() {
            return Err(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients must be finite".to_string());
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_shape(self.n_features(), features)?;
        Ok(self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (coef, x)| acc + coef * x))
    }
}

impl TreeEnsemble {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err("base_score must be finite".to_string());
        }
        let n_features = self.feature_names.len();
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|reason| format!("tree {}: {}", i, reason))?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        check_shape(self.n_features(), features)?;

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features)?;
        }

        Ok(match self.aggregation {
            Aggregation::Mean => self.base_score + total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + total,
        })
    }
}

impl Tree {
    fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} of {}",
                            idx, feature, n_features
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {} has a NaN threshold", idx));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!(
                                "node {} points to invalid child {}",
                                idx, child
                            ));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} is not finite", idx));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, features: &[f64]) -> Result<f64> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features
                        .get(*feature)
                        .ok_or_else(|| Error::model(format!("missing feature {}", feature)))?;
                    idx = if *x <= *threshold { *left } else { *right };
                }
                None => return Err(Error::model(format!("tree node {} out of range", idx))),
            }
        }
    }
}
