use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read rule set {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule set {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid pattern for rule at priority {priority}: {source}")]
    InvalidPattern {
        priority: i32,
        #[source]
        source: regex::Error,
    },

    #[error("invalid rule set: {0}")]
    InvalidRuleSet(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
