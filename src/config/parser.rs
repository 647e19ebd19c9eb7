use std::path::{Path, PathBuf};
use crate::errors::PwnError;
use super::types::PwnConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pwncmds.yml";

/// Load the explicit config file, else `pwncmds.yml` if present, else defaults.
pub async fn load_config(explicit: Option<&Path>) -> Result<PwnConfig, PwnError> {
    if let Some(path) = explicit {
        return parse_config(path).await;
    }

    let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        return parse_config(&fallback).await;
    }

    debug!("No config file, using defaults");
    Ok(PwnConfig::default())
}

pub async fn parse_config(path: &Path) -> Result<PwnConfig, PwnError> {
    if !path.exists() {
        return Err(PwnError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(PwnError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(PwnConfig::default());
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: PwnConfig = serde_yaml::from_value(yaml)?;

    validate_values(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), PwnError> {
    // Convert YAML value to JSON for schema validation
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| PwnError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| PwnError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| PwnError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only: unknown keys and the like are reported, not fatal.
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that would make the resolver unusable.
fn validate_values(config: &PwnConfig) -> Result<(), PwnError> {
    if let Some(resolver) = &config.resolver {
        if resolver.concurrency == Some(0) {
            return Err(PwnError::Config("resolver.concurrency must be at least 1".into()));
        }
        if resolver.timeout_secs == Some(0) {
            return Err(PwnError::Config("resolver.timeout_secs must be at least 1".into()));
        }
    }

    if let Some(kb) = &config.knowledge_base {
        let empty = |v: &Option<String>| v.as_deref().map_or(false, |s| s.trim().is_empty());
        if empty(&kb.entries_dir) || empty(&kb.catalog_path) {
            return Err(PwnError::Config("knowledge_base paths must not be empty".into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use tempfile::TempDir;

    #[test]
    fn test_validate_values_zero_concurrency() {
        let config = PwnConfig {
            resolver: Some(ResolverConfig {
                concurrency: Some(0),
                timeout_secs: None,
            }),
            ..Default::default()
        };
        assert!(validate_values(&config).is_err());
    }

    #[test]
    fn test_validate_values_zero_timeout() {
        let config = PwnConfig {
            resolver: Some(ResolverConfig {
                concurrency: None,
                timeout_secs: Some(0),
            }),
            ..Default::default()
        };
        assert!(validate_values(&config).is_err());
    }

    #[test]
    fn test_validate_values_empty_config() {
        assert!(validate_values(&PwnConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/pwncmds.yml")).await.unwrap_err();
        assert!(matches!(err, PwnError::Config(_)));
    }

    #[tokio::test]
    async fn test_parse_config_full() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pwncmds.yml");
        std::fs::write(
            &path,
            "knowledge_base:\n  entries_dir: /srv/GTFOBins/_gtfobins\n  catalog_path: /srv/GTFOBins/_data/functions.yml\nresolver:\n  timeout_secs: 2\n  concurrency: 4\n",
        )
        .unwrap();

        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.knowledge_base().entries_dir(), PathBuf::from("/srv/GTFOBins/_gtfobins"));
        assert_eq!(config.resolver().concurrency(), 4);
        assert_eq!(config.resolver().timeout().as_secs(), 2);
    }

    #[tokio::test]
    async fn test_parse_config_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pwncmds.yml");
        std::fs::write(&path, "").unwrap();
        let config = parse_config(&path).await.unwrap();
        assert!(config.resolver.is_none());
    }

    #[tokio::test]
    async fn test_load_config_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yml");
        std::fs::write(&path, "resolver:\n  concurrency: 1\n").unwrap();
        let config = load_config(Some(&path)).await.unwrap();
        assert_eq!(config.resolver().concurrency(), 1);
    }
}
