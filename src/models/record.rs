use std::path::{Path, PathBuf};

/// One documented way to abuse a binary for a given function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technique {
    pub description: Option<String>,
    /// Kept verbatim; may reference the binary by name.
    pub code: String,
}

/// Outcome of looking a binary up in the current environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedBinary {
    Found(PathBuf),
    Missing,
}

impl ResolvedBinary {
    pub fn found(path: impl Into<PathBuf>) -> Self {
        ResolvedBinary::Found(path.into())
    }

    pub fn missing() -> Self {
        ResolvedBinary::Missing
    }

    pub fn exists(&self) -> bool {
        matches!(self, ResolvedBinary::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ResolvedBinary::Found(path) => Some(path),
            ResolvedBinary::Missing => None,
        }
    }
}

/// A knowledge-base entry for one binary, optionally annotated with where
/// it lives on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub name: String,
    /// Function tag to techniques, in document order.
    techniques_by_tag: Vec<(String, Vec<Technique>)>,
    resolution: Option<ResolvedBinary>,
}

impl CommandRecord {
    pub fn new(name: impl Into<String>, techniques_by_tag: Vec<(String, Vec<Technique>)>) -> Self {
        Self {
            name: name.into(),
            techniques_by_tag,
            resolution: None,
        }
    }

    /// Techniques documented for `tag`, or `None` when the binary has none.
    pub fn techniques(&self, tag: &str) -> Option<&[Technique]> {
        self.techniques_by_tag
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, techniques)| techniques.as_slice())
    }

    /// Tags in the order the entry lists them.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.techniques_by_tag.iter().map(|(t, _)| t.as_str())
    }

    pub fn sorted_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        tags
    }

    pub fn techniques_by_tag(&self) -> &[(String, Vec<Technique>)] {
        &self.techniques_by_tag
    }

    /// True when every tag in `required` is documented for this binary.
    pub fn supports_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|tag| self.techniques(tag.as_ref()).is_some())
    }

    pub fn set_resolution(&mut self, resolution: ResolvedBinary) {
        self.resolution = Some(resolution);
    }

    pub fn resolution(&self) -> Option<&ResolvedBinary> {
        self.resolution.as_ref()
    }

    pub fn exists(&self) -> bool {
        self.resolution.as_ref().map_or(false, ResolvedBinary::exists)
    }

    /// Only set when the binary was resolved and found.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolution.as_ref().and_then(ResolvedBinary::path)
    }
}

/// Records that survived filtering and resolution, in working-list order.
pub type CandidateSet = Vec<CommandRecord>;
