use crate::cli::commands::FindArgs;
use crate::errors::PwnError;
use crate::output::{render_json, render_listing, ResolutionProgress};
use crate::techniques::{validate_functions, CandidateRequest};
use super::context::AppContext;
use tracing::info;

pub async fn handle_find(ctx: &AppContext, args: FindArgs) -> Result<(), PwnError> {
    let catalog = ctx.store().list_capability_tags()?;
    validate_functions(&args.function, &catalog)?;

    info!(functions = ?args.function, "Finding commands");

    let request = CandidateRequest::all().with_required_tags(args.function);

    let progress = ResolutionProgress::new(ctx.quiet);
    let candidates = ctx
        .engine
        .build_candidate_set_observed(&request, |done, total| progress.update(done, total))
        .await?;
    progress.finish();

    if args.json {
        println!("{}", render_json(&candidates)?);
    } else {
        print!("{}", render_listing(&candidates));
    }
    Ok(())
}
