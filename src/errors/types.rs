use thiserror::Error;

#[derive(Debug, Error)]
pub enum PwnError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No knowledge-base entry for command: {0}")]
    EntryNotFound(String),

    #[error("Malformed entry for {name}: {reason}")]
    MalformedEntry { name: String, reason: String },

    #[error("Malformed technique #{index} under '{tag}' for {name}: {reason}")]
    MalformedTechnique {
        name: String,
        tag: String,
        index: usize,
        reason: String,
    },

    #[error("Function catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Cannot resolve {name}: {reason}")]
    ResolutionUnavailable { name: String, reason: String },

    #[error("Invalid function: {0}")]
    InvalidFunction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PwnError {
    pub fn malformed_entry(name: &str, reason: impl Into<String>) -> Self {
        PwnError::MalformedEntry {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn resolution_unavailable(name: &str, reason: impl Into<String>) -> Self {
        PwnError::ResolutionUnavailable {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
