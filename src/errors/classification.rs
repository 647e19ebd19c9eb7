use super::types::PwnError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl PwnError {
    /// Classify this error to determine its type and the process exit code.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Broken local setup
            PwnError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },

            // Knowledge base missing or incompatible
            PwnError::MalformedEntry { .. } => ErrorClassification {
                error_type: "MalformedEntryError",
                exit_code: 3,
            },
            PwnError::MalformedTechnique { .. } => ErrorClassification {
                error_type: "MalformedTechniqueError",
                exit_code: 3,
            },
            PwnError::CatalogUnavailable(_) => ErrorClassification {
                error_type: "CatalogUnavailableError",
                exit_code: 3,
            },

            PwnError::ResolutionUnavailable { .. } => ErrorClassification {
                error_type: "ResolutionUnavailableError",
                exit_code: 4,
            },

            // User input mistakes
            PwnError::EntryNotFound(_) => ErrorClassification {
                error_type: "EntryNotFoundError",
                exit_code: 5,
            },
            PwnError::InvalidFunction(_) => ErrorClassification {
                error_type: "InvalidFunctionError",
                exit_code: 5,
            },

            PwnError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            PwnError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
            PwnError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                exit_code: 1,
            },
        }
    }
}
