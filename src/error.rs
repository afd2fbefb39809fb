use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model file not found: {path}")]
    ModelNotFound { path: String },

    #[error("Invalid model artifact {path}: {reason}")]
    InvalidModel { path: String, reason: String },

    #[error("Feature columns for {model} model must be {expected:?}, found {found:?}")]
    FeatureMismatch {
        model: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Feature row has {found} values, model expects {expected}")]
    FeatureShape { expected: usize, found: usize },

    #[error("Model error: {0}")]
    Model(String),

    #[error("y contains previously unseen labels: '{label}'")]
    UnknownLabel { label: String },

    #[error("FSM error: {0}")]
    Fsm(String),

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

    pub fn invalid_model(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn fsm(msg: impl Into<String>) -> Self {
        Self::Fsm(msg.into())
    }

    /// True for errors that can only happen while the service is starting up.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::ModelNotFound { .. }
                | Self::InvalidModel { .. }
                | Self::FeatureMismatch { .. }
                | Self::Yaml(_)
                | Self::AddrParse(_)
        )
    }
}
