use crate::errors::PwnError;
use crate::output::render_update_notice;
use super::context::AppContext;
use tracing::warn;

/// Refreshing the knowledge base is left to the tooling that manages its
/// checkout; this only points at it.
pub async fn handle_update(ctx: &AppContext) -> Result<(), PwnError> {
    let store = ctx.store();
    warn!(dir = %store.entries_dir().display(), "Automatic update is not supported");
    print!("{}", render_update_notice(store.entries_dir(), store.catalog_path()));
    Ok(())
}
