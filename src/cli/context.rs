use std::path::PathBuf;
use std::sync::Arc;
use crate::config::{load_config, PwnConfig};
use crate::errors::PwnError;
use crate::techniques::{FilterEngine, RecordStore, WhichResolver};
use super::commands::Cli;
use tracing::debug;

/// Everything a subcommand needs, built once from config and global flags.
pub struct AppContext {
    pub engine: FilterEngine,
    pub quiet: bool,
}

impl AppContext {
    pub async fn from_cli(cli: &Cli) -> Result<Self, PwnError> {
        let config_path = cli.config.as_ref().map(PathBuf::from);
        let config = load_config(config_path.as_deref()).await?;
        Ok(Self::from_config(config, cli))
    }

    pub fn from_config(config: PwnConfig, cli: &Cli) -> Self {
        let kb = config.knowledge_base();
        let entries_dir = cli.gtfobins.as_ref().map(PathBuf::from).unwrap_or_else(|| kb.entries_dir());
        let catalog_path = cli.functions.as_ref().map(PathBuf::from).unwrap_or_else(|| kb.catalog_path());
        debug!(entries = %entries_dir.display(), catalog = %catalog_path.display(), "Knowledge base");

        let resolver_config = config.resolver();
        let resolver = WhichResolver::new(resolver_config.timeout());
        let engine = FilterEngine::new(RecordStore::new(entries_dir, catalog_path), Arc::new(resolver))
            .with_concurrency(resolver_config.concurrency());

        Self {
            engine,
            quiet: cli.quiet,
        }
    }

    pub fn store(&self) -> &RecordStore {
        self.engine.store()
    }
}
