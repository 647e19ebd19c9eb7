use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use regex::Regex;
use serde_yaml::Value;
use crate::errors::PwnError;
use crate::models::{CommandRecord, Technique};
use super::catalog::parse_catalog;
use tracing::{debug, info, warn};

/// Extension of per-binary entry files in the knowledge base.
pub const ENTRY_EXTENSION: &str = "md";

/// Names that can map to a file directly inside the entries directory.
static ENTRY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_+][A-Za-z0-9._+-]*$").expect("entry name pattern is valid")
});

/// Read-only access to the GTFOBins-style knowledge base on disk.
#[derive(Debug, Clone)]
pub struct RecordStore {
    entries_dir: PathBuf,
    catalog_path: PathBuf,
}

impl RecordStore {
    pub fn new(entries_dir: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            entries_dir: entries_dir.into(),
            catalog_path: catalog_path.into(),
        }
    }

    pub fn entries_dir(&self) -> &Path {
        &self.entries_dir
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Every entry name in the knowledge base, sorted lexicographically.
    pub fn list_all_names(&self) -> Result<Vec<String>, PwnError> {
        if !self.entries_dir.is_dir() {
            return Err(PwnError::Config(format!(
                "Knowledge base directory not found: {}",
                self.entries_dir.display()
            )));
        }

        // The directory is literal; only the file name part is a pattern.
        let dir = glob::Pattern::escape(&self.entries_dir.to_string_lossy());
        let pattern_str = Path::new(&dir).join(format!("*.{}", ENTRY_EXTENSION)).to_string_lossy().into_owned();

        let mut names = Vec::new();
        for entry in glob::glob(&pattern_str)
            .map_err(|e| PwnError::Config(format!("Invalid glob pattern: {}", e)))?
        {
            let path = entry.map_err(|e| PwnError::Config(format!("Glob error: {}", e)))?;
            if !path.is_file() {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if ENTRY_NAME.is_match(stem) => names.push(stem.to_string()),
                _ => warn!(path = %path.display(), "Skipping entry with unusable name"),
            }
        }
        names.sort();

        info!(entries = names.len(), dir = %self.entries_dir.display(), "Enumerated knowledge base");
        Ok(names)
    }

    /// Load and parse the entry for `name`. The record comes back unresolved.
    pub fn load_record(&self, name: &str) -> Result<CommandRecord, PwnError> {
        if !ENTRY_NAME.is_match(name) {
            return Err(PwnError::EntryNotFound(name.to_string()));
        }

        let path = self.entries_dir.join(format!("{}.{}", name, ENTRY_EXTENSION));
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PwnError::EntryNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let record = parse_entry(name, &content)?;
        debug!(command = %name, tags = record.techniques_by_tag().len(), "Loaded entry");
        Ok(record)
    }

    /// Every function tag in the global catalog, sorted lexicographically.
    pub fn list_capability_tags(&self) -> Result<Vec<String>, PwnError> {
        let content = std::fs::read_to_string(&self.catalog_path).map_err(|e| {
            PwnError::CatalogUnavailable(format!("{}: {}", self.catalog_path.display(), e))
        })?;
        let tags = parse_catalog(&content)?;
        info!(functions = tags.len(), "Loaded function catalog");
        Ok(tags)
    }
}

/// Drop the framing lines around the YAML body: the first line, and the
/// closing marker plus the empty string after the final newline.
fn strip_framing(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() < 3 {
        return None;
    }
    Some(lines[1..lines.len() - 2].join("\n"))
}

/// Parse the contents of a knowledge-base entry file.
pub fn parse_entry(name: &str, content: &str) -> Result<CommandRecord, PwnError> {
    let body = strip_framing(content)
        .ok_or_else(|| PwnError::malformed_entry(name, "entry is too short to contain a body"))?;

    let doc: Value = serde_yaml::from_str(&body)
        .map_err(|e| PwnError::malformed_entry(name, format!("invalid YAML: {}", e)))?;

    let root = doc
        .as_mapping()
        .ok_or_else(|| PwnError::malformed_entry(name, "body is not a mapping"))?;

    let functions = match root.get("functions") {
        Some(Value::Mapping(functions)) => functions.clone(),
        Some(Value::Null) => serde_yaml::Mapping::new(),
        Some(_) => return Err(PwnError::malformed_entry(name, "'functions' is not a mapping")),
        None => return Err(PwnError::malformed_entry(name, "missing 'functions' key")),
    };

    // serde_yaml::Mapping iterates in document order.
    let mut techniques_by_tag = Vec::with_capacity(functions.len());
    for (key, value) in &functions {
        let tag = key
            .as_str()
            .ok_or_else(|| PwnError::malformed_entry(name, "function name is not a string"))?;

        let items = match value {
            Value::Sequence(items) => items.as_slice(),
            Value::Null => &[][..],
            _ => {
                return Err(PwnError::malformed_entry(
                    name,
                    format!("function '{}' is not a list", tag),
                ))
            }
        };

        let techniques = items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_technique(name, tag, index, item))
            .collect::<Result<Vec<_>, _>>()?;

        techniques_by_tag.push((tag.to_string(), techniques));
    }

    Ok(CommandRecord::new(name, techniques_by_tag))
}

fn parse_technique(name: &str, tag: &str, index: usize, item: &Value) -> Result<Technique, PwnError> {
    let malformed = |reason: &str| PwnError::MalformedTechnique {
        name: name.to_string(),
        tag: tag.to_string(),
        index,
        reason: reason.to_string(),
    };

    let fields = item.as_mapping().ok_or_else(|| malformed("technique is not a mapping"))?;

    let code = match fields.get("code") {
        Some(Value::String(code)) => code.clone(),
        Some(_) => return Err(malformed("'code' is not a string")),
        None => return Err(malformed("missing 'code'")),
    };

    let description = match fields.get("description") {
        Some(Value::String(description)) => Some(description.clone()),
        Some(Value::Null) | None => None,
        Some(_) => return Err(malformed("'description' is not a string")),
    };

    Ok(Technique { description, code })
}
