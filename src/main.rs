use clap::{CommandFactory, Parser};
use pwncmds::cli::{self, AppContext, Cli, Commands};
use pwncmds::errors::PwnError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(&cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.classify().exit_code);
        }
    }
}

async fn run(cli: &Cli) -> Result<(), PwnError> {
    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = AppContext::from_cli(cli).await?;

    match command {
        Commands::List(args) => cli::list::handle_list(&ctx, args).await,
        Commands::Desc(args) => cli::desc::handle_desc(&ctx, args).await,
        Commands::Find(args) => cli::find::handle_find(&ctx, args).await,
        Commands::Functions => cli::functions::handle_functions(&ctx).await,
        Commands::Update => cli::update::handle_update(&ctx).await,
    }
}
