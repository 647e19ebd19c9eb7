use crate::cli::commands::DescArgs;
use crate::errors::PwnError;
use crate::output::{render_description, render_description_header, ResolutionProgress};
use crate::techniques::{validate_functions, CandidateRequest};
use super::context::AppContext;
use tracing::info;

pub async fn handle_desc(ctx: &AppContext, args: DescArgs) -> Result<(), PwnError> {
    if !args.function.is_empty() {
        let catalog = ctx.store().list_capability_tags()?;
        validate_functions(&args.function, &catalog)?;
    }

    info!(commands = ?args.command, functions = ?args.function, "Describing commands");

    // Functions select what is printed, not which commands qualify.
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

    let tags = (!args.function.is_empty()).then_some(args.function.as_slice());

    print!("{}", render_description_header());
    for record in &candidates {
        print!("{}", render_description(record, tags));
    }
    Ok(())
}
