use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENTRIES_DIR: &str = "../GTFOBins/_gtfobins/";
pub const DEFAULT_CATALOG_PATH: &str = "../GTFOBins/_data/functions.yml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PwnConfig {
    pub knowledge_base: Option<KnowledgeBaseConfig>,
    pub resolver: Option<ResolverConfig>,
}

impl PwnConfig {
    pub fn knowledge_base(&self) -> KnowledgeBaseConfig {
        self.knowledge_base.clone().unwrap_or_default()
    }

    pub fn resolver(&self) -> ResolverConfig {
        self.resolver.clone().unwrap_or_default()
    }
}

/// Where the knowledge base lives on disk.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct KnowledgeBaseConfig {
    /// Directory holding one `<name>.md` entry per binary.
    pub entries_dir: Option<String>,
    /// YAML file whose top-level keys are the function tags.
    pub catalog_path: Option<String>,
}

impl KnowledgeBaseConfig {
    pub fn entries_dir(&self) -> PathBuf {
        PathBuf::from(self.entries_dir.as_deref().unwrap_or(DEFAULT_ENTRIES_DIR))
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(self.catalog_path.as_deref().unwrap_or(DEFAULT_CATALOG_PATH))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ResolverConfig {
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }
}
