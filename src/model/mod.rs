mod regressor;
mod types;

pub use regressor::Regressor;
#[cfg(test)]
pub use regressor::MockRegressor;
pub use types::*;

use crate::{Error, Result};
use std::{io::ErrorKind, sync::Arc};
use tracing::{debug, info};

/// Reads and structurally validates a model artifact.
pub async fn load_artifact(path: &str) -> Result<ModelArtifact> {
    debug!("Loading model artifact from: {}", path);

    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::ModelNotFound {
                path: path.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let artifact: ModelArtifact = serde_json::from_str(&contents)
        .map_err(|e| Error::invalid_model(path, e.to_string()))?;
    artifact
        .validate()
        .map_err(|reason| Error::invalid_model(path, reason))?;

    Ok(artifact)
}

/// Fails unless the artifact was trained on exactly the role's columns, in order.
pub fn check_columns(artifact: &ModelArtifact, role: ModelRole) -> Result<()> {
    let found = artifact.feature_names();
    let expected = role.columns();

    if found.iter().map(String::as_str).ne(expected.iter().copied()) {
        return Err(Error::FeatureMismatch {
            model: role.name().to_string(),
            expected: expected.iter().map(|c| c.to_string()).collect(),
            found: found.to_vec(),
        });
    }
    Ok(())
}

pub async fn load_model(path: &str, role: ModelRole) -> Result<Arc<dyn Regressor>> {
    let artifact = load_artifact(path).await?;
    check_columns(&artifact, role)?;

    info!(
        "Loaded {} model from {} ({} features)",
        role.name(),
        path,
        artifact.n_features()
    );

    Ok(Arc::new(artifact))
}
