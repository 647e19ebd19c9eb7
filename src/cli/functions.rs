use crate::errors::PwnError;
use crate::output::render_functions;
use super::context::AppContext;

pub async fn handle_functions(ctx: &AppContext) -> Result<(), PwnError> {
    let tags = ctx.store().list_capability_tags()?;
    print!("{}", render_functions(&tags));
    Ok(())
}
