use serde_yaml::Value;
use crate::errors::PwnError;

/// Parse the function catalog: a YAML mapping whose keys are the tag names.
/// Values are ignored. Returns the names sorted.
pub fn parse_catalog(content: &str) -> Result<Vec<String>, PwnError> {
    let doc: Value = serde_yaml::from_str(content)
        .map_err(|e| PwnError::CatalogUnavailable(format!("invalid YAML: {}", e)))?;

    let mapping = doc
        .as_mapping()
        .ok_or_else(|| PwnError::CatalogUnavailable("catalog is not a mapping".into()))?;

    let mut tags = mapping
        .keys()
        .map(|key| {
            key.as_str()
                .map(str::to_string)
                .ok_or_else(|| PwnError::CatalogUnavailable("function name is not a string".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    tags.sort();
    Ok(tags)
}

/// Check requested functions against the catalog. Unknown names are reported
/// all at once.
pub fn validate_functions<S: AsRef<str>>(requested: &[S], catalog: &[String]) -> Result<(), PwnError> {
    let unknown: Vec<&str> = requested
        .iter()
        .map(AsRef::as_ref)
        .filter(|f| !catalog.iter().any(|c| c.as_str() == *f))
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(PwnError::InvalidFunction(format!(
            "{} (choose from: {})",
            unknown.join(", "),
            catalog.join(", ")
        )))
    }
}
