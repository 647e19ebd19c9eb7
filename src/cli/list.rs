use crate::cli::commands::ListArgs;
use crate::errors::PwnError;
use crate::output::{render_json, render_listing, ResolutionProgress};
use crate::techniques::CandidateRequest;
use super::context::AppContext;
use tracing::info;

pub async fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<(), PwnError> {
    info!(commands = ?args.command, "Listing commands");

    let request = CandidateRequest {
        names: args.command,
        ..Default::default()
    };

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
